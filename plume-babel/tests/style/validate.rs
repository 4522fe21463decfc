//! The forgiving validator

use plume_babel::style::validate::is_hex_color;
use plume_babel::style::{validate, FieldConstraint, StyleConfig, StyleField, StylePatch, StyleValue};
use proptest::prelude::*;

fn field_strategy() -> impl Strategy<Value = StyleField> {
    proptest::sample::select(StyleField::ALL.to_vec())
}

fn value_strategy() -> impl Strategy<Value = StyleValue> {
    prop_oneof![
        any::<f64>().prop_map(StyleValue::Number),
        (-500.0f64..3000.0).prop_map(StyleValue::Number),
        ".{0,24}".prop_map(StyleValue::Text),
        "#[0-9a-fA-F]{3,6}".prop_map(StyleValue::Text),
        "-?[0-9]{1,4}(\\.[0-9]{1,2})?(px)?".prop_map(StyleValue::Text),
    ]
}

fn assert_within_constraints(config: &StyleConfig) {
    for &field in StyleField::ALL {
        match (field.constraint(), config.get(field)) {
            (FieldConstraint::Range { min, max }, StyleValue::Number(n)) => {
                assert!(n.is_finite() && n >= min && n <= max, "{field}: {n}");
            }
            (FieldConstraint::Color, StyleValue::Text(color)) => {
                assert!(is_hex_color(&color), "{field}: {color}");
            }
            (FieldConstraint::Keyword(allowed), StyleValue::Text(keyword)) => {
                assert!(allowed.contains(&keyword.as_str()), "{field}: {keyword}");
            }
            (FieldConstraint::Text, StyleValue::Text(text)) => {
                assert!(!text.trim().is_empty(), "{field} is blank");
            }
            (constraint, value) => panic!("{field}: {value:?} does not fit {constraint:?}"),
        }
    }
}

proptest! {
    #[test]
    fn test_any_patch_validates_within_constraints(
        entries in proptest::collection::vec((field_strategy(), value_strategy()), 0..40)
    ) {
        let patch: StylePatch = entries.into_iter().collect();
        assert_within_constraints(&validate(&patch));
    }

    #[test]
    fn test_validated_config_is_a_fixed_point(
        entries in proptest::collection::vec((field_strategy(), value_strategy()), 0..40)
    ) {
        let patch: StylePatch = entries.into_iter().collect();
        let config = validate(&patch);
        prop_assert_eq!(validate(&config.to_patch()), config);
    }
}

#[test]
fn test_empty_patch_is_defaults() {
    assert_eq!(validate(&StylePatch::new()), StyleConfig::default());
    assert_within_constraints(&StyleConfig::default());
}

#[test]
fn test_numeric_strings_are_accepted() {
    let config = validate(
        &StylePatch::new()
            .with(StyleField::H2Size, "30")
            .with(StyleField::H3Size, "999")
            .with(StyleField::BodyFontSize, "large"),
    );
    assert_eq!(config.h2_size, 30.0);
    assert_eq!(config.h3_size, 32.0);
    assert_eq!(config.body_font_size, 16.0);
}

#[test]
fn test_colors_and_keywords_fall_back() {
    let config = validate(
        &StylePatch::new()
            .with(StyleField::H2Color, "#ABCDEF")
            .with(StyleField::H3Color, "rgb(0,0,0)")
            .with(StyleField::BodyTextAlign, "justify")
            .with(StyleField::BodyWordBreak, "sideways"),
    );
    assert_eq!(config.h2_color, "#ABCDEF");
    assert_eq!(config.h3_color, StyleConfig::default().h3_color);
    assert_eq!(config.body_text_align.to_string(), "justify");
    assert_eq!(config.body_word_break, StyleConfig::default().body_word_break);
}
