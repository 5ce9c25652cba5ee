/// Render a 0-5 half-step rating the way Letterboxd displays it: "★★★½".
/// `None` (unrated) renders as an empty string.
pub fn format_stars(rating: Option<f32>) -> String {
    let Some(rating) = rating else {
        return String::new();
    };
    let half_steps = ((rating * 2.0).round() as i32).clamp(0, 10);
    let mut stars = "★".repeat((half_steps / 2) as usize);
    if half_steps % 2 == 1 {
        stars.push('½');
    }
    stars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_and_half_stars() {
        assert_eq!(format_stars(Some(4.0)), "★★★★");
        assert_eq!(format_stars(Some(3.5)), "★★★½");
        assert_eq!(format_stars(Some(0.5)), "½");
    }

    #[test]
    fn test_unrated_renders_empty() {
        assert_eq!(format_stars(None), "");
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        assert_eq!(format_stars(Some(7.0)), "★★★★★");
        assert_eq!(format_stars(Some(-1.0)), "");
    }
}
