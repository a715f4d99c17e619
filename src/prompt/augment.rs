//! Stylistic augmentation of user prompts.
//!
//! The suffix biases the generator toward nature-themed, portrait-friendly
//! wallpapers. It is appended verbatim and never depends on the input.
pub const STYLE_SUFFIX: &str = ", beautiful nature wallpaper, high quality, mobile phone wallpaper, 4K, detailed, stunning, peaceful natural scenery";

/// Append the fixed style suffix to `prompt` without touching the prompt itself.
pub fn augment_prompt(prompt: &str) -> String {
    let mut out = String::with_capacity(prompt.len() + STYLE_SUFFIX.len());
    out.push_str(prompt);
    out.push_str(STYLE_SUFFIX);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calm_lake_prompt() {
        assert_eq!(
            augment_prompt("a calm lake at dawn"),
            "a calm lake at dawn, beautiful nature wallpaper, high quality, mobile phone wallpaper, 4K, detailed, stunning, peaceful natural scenery"
        );
    }

    #[test]
    fn surrounding_whitespace_is_kept() {
        let raw = "  misty forest \n";
        let out = augment_prompt(raw);
        assert!(out.starts_with(raw));
        assert_eq!(&out[raw.len()..], STYLE_SUFFIX);
    }
}
