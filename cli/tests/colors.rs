use waypath::colors::ColorScheme;

#[test]
fn test_color_scheme_with_colors() {
    let colors = ColorScheme::new(true);

    // Just verify methods don't panic and keep the text
    assert!(colors.node("3,4").to_string().contains("3,4"));
    assert!(colors.path("*").to_string().contains('*'));
    assert!(colors.wall("#").to_string().contains('#'));
    assert!(colors.endpoint("S").to_string().contains('S'));
    assert!(colors.success("Success").to_string().contains("Success"));
    assert!(colors.error("Error").to_string().contains("Error"));
    assert!(colors.step_number("1.").to_string().contains("1."));
    assert!(colors.number("123").to_string().contains("123"));
    assert!(colors.stats("Stats").to_string().contains("Stats"));
}

#[test]
fn test_color_scheme_no_colors() {
    let colors = ColorScheme::new(false);

    // With colors disabled, output should be plain text
    assert_eq!(colors.node("3,4").to_string(), "3,4");
    assert_eq!(colors.path("*").to_string(), "*");
    assert_eq!(colors.wall("#").to_string(), "#");
    assert_eq!(colors.error("Error").to_string(), "Error");
}
