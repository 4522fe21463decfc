//! The element preset library

use plume_babel::inspect::extract_presets;
use plume_babel::library::preset::{DEFAULT_SOURCE_TITLE, SYSTEM_SOURCE};
use plume_babel::library::{
    derive_refine_by_type, NewTemplate, PresetOrigin, PresetUpdate, StyleLibrary, StyleTemplate,
};
use plume_babel::render::{render, RenderMode, RenderOptions};
use plume_babel::style::{ElementKind, StyleConfig, StyleField, StylePatch, StyleValue};

#[test]
fn test_seeded_library_has_one_default_per_kind() {
    let library = StyleLibrary::seeded();
    assert_eq!(library.len(), ElementKind::ALL.len());
    for kind in ElementKind::ALL {
        let presets: Vec<_> = library.for_kind(kind).collect();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, format!("default-{kind}"));
        assert_eq!(presets[0].origin, PresetOrigin::System);
        assert_eq!(presets[0].source_title, SYSTEM_SOURCE);
        assert!(presets[0].config_patch.fields().all(|field| kind.allows(field)));
    }
}

#[test]
fn test_empty_document_loads_seeded() {
    let library = StyleLibrary::from_json(r#"{"presets": []}"#).unwrap();
    let ids: Vec<&str> = library.presets().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), ElementKind::ALL.len());
    assert_eq!(ids[0], "sys_default_h1_1");

    let kept = StyleLibrary::from_json(&library.to_json().unwrap()).unwrap();
    assert_eq!(kept, library);
}

#[test]
fn test_import_extracted_renames_on_conflict() {
    let html = r#"<h2 style="font-size:30px">A</h2><p style="font-size:18px">b</p>"#;
    let result = extract_presets(html, &StyleConfig::default()).unwrap();

    let mut library = StyleLibrary::new();
    let first = library.import_extracted(&result.presets, "Weekly");
    assert_eq!(first[0].final_name, "Weekly-h2");
    assert!(first[0].renamed_from.is_none());

    let second = library.import_extracted(&result.presets, "Weekly");
    assert_eq!(second[0].final_name, "Weekly-h2-2");
    assert_eq!(second[0].renamed_from.as_deref(), Some("Weekly-h2"));
    assert_eq!(library.len(), 4);
    assert_eq!(library.presets()[0].name, "Weekly-h2-2");
    assert_eq!(library.presets()[0].origin, PresetOrigin::Extracted);

    let untitled = library.import_extracted(&result.presets[..1], "  ");
    assert_eq!(untitled[0].final_name, format!("{DEFAULT_SOURCE_TITLE}-h2"));
}

#[test]
fn test_manual_update_duplicate_delete() {
    let mut library = StyleLibrary::new();
    let a = library.create_manual(ElementKind::P, None);
    let b = library.create_manual(ElementKind::P, None);
    assert_eq!(a.name, "manual-p");
    assert_eq!(b.name, "manual-p-2");

    assert!(library.update(
        &b.id,
        PresetUpdate {
            name: Some("manual-p".into()),
            config_patch: Some(StylePatch::new().with(StyleField::BodyFontSize, 18.0)),
            source_title: None,
        }
    ));
    assert_eq!(library.get(&b.id).unwrap().name, "manual-p-2");

    let copy = library.duplicate(&a.id).unwrap();
    assert_eq!(copy.name, "manual-p-copy");
    assert_eq!(copy.config_patch, a.config_patch);

    assert!(library.delete(&a.id));
    assert!(!library.delete(&a.id));
    assert!(!library.update("missing", PresetUpdate::default()));
    assert_eq!(library.len(), 2);
}

#[test]
fn test_template_mapping_drives_rendering() {
    let mut library = StyleLibrary::new();
    let preset = library.create_manual(ElementKind::H2, Some("big-h2"));
    library.update(
        &preset.id,
        PresetUpdate {
            config_patch: Some(StylePatch::new().with(StyleField::H2Size, 36.0)),
            ..PresetUpdate::default()
        },
    );

    let template = StyleTemplate::create(NewTemplate::new("T").with_preset(ElementKind::H2, &preset.id));
    let refine = derive_refine_by_type(&template, &library);
    assert_eq!(
        refine.get(ElementKind::H2).and_then(|p| p.get(StyleField::H2Size)),
        Some(&StyleValue::Number(36.0))
    );

    let options = RenderOptions::new(RenderMode::Standard).with_refine_by_type(refine);
    let html = render("## Big\n\nsmall", &template.global_style_config, &options).unwrap();
    assert!(html.starts_with("<h2 style=\"font-size:36px;"));
}
