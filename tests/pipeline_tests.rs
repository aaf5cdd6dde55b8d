//! End-to-end pipeline scenarios
//!
//! These tests run raw text through preset resolution and the full stage
//! sequence, checking the exact text that would reach the synthesis backend.

use prosody_tts::core::prosody::{
    CUSTOM_PRESET, MAX_EXPANDED_BYTES, ParameterOverrides, ParameterSet, PipelineOptions,
    PresetCatalog, ProsodyPipeline, RepeatScope, SLOW_CHANT_PRESET, Style, VowelMode,
    build_final_text, encode_pause,
};
use prosody_tts::errors::ProsodyError;

fn preset(name: &str) -> ParameterSet {
    PresetCatalog::builtin().resolve(name).unwrap()
}

#[test]
fn test_defaults_single_word() {
    let out = build_final_text("hi", &ParameterSet::default()).unwrap();
    assert_eq!(out.as_str(), "hi. . ");
}

#[test]
fn test_inline_pause_with_defaults() {
    let out = build_final_text("Hello there [pause=600] this works", &ParameterSet::default())
        .unwrap();
    assert!(out.as_str().starts_with("Hello there . . this works"));
    assert_eq!(out.as_str(), "Hello there . . this works. . ");
}

#[test]
fn test_slow_chant_preset() {
    let params = preset(SLOW_CHANT_PRESET);
    let out = build_final_text("sun rises", &params).unwrap();

    assert!(params.is_slow());
    assert_eq!(out.as_str(), "SUUN ~ riisees. . ");
}

#[test]
fn test_staccato_drill_preset() {
    let params = preset("Staccato Drill");
    let out = build_final_text("go home now", &params).unwrap();

    let unit = "GO'. ho'me'. no'w. . . ";
    assert_eq!(out.as_str(), unit.repeat(2));
    assert!(!params.is_slow());
}

#[test]
fn test_clipped_command_preset() {
    let out = build_final_text("move out", &preset("clipped command")).unwrap();
    assert_eq!(out.as_str(), "MOVE! out. . ");
}

#[test]
fn test_custom_preset_is_identity() {
    assert_eq!(preset(CUSTOM_PRESET), ParameterSet::default());
}

#[test]
fn test_repeat_count_one_appends_two_gaps() {
    let params = ParameterSet::builder()
        .cluster_pause_ms(0)
        .repeat_pause_ms(0)
        .build()
        .unwrap();
    let out = build_final_text("rhythm", &params).unwrap();
    let gap = encode_pause(0);
    assert_eq!(out.as_str(), format!("rhythm{gap}{gap}"));
}

#[test]
fn test_repeat_count_repeats_whole_unit() {
    let params = ParameterSet::builder()
        .repeat_count(3)
        .cluster_pause_ms(500)
        .repeat_pause_ms(0)
        .build()
        .unwrap();
    let out = build_final_text("drum", &params).unwrap();
    assert_eq!(out.as_str(), "drum. . . ".repeat(3));
}

#[test]
fn test_overrides_on_top_of_preset() {
    let catalog = PresetCatalog::builtin();
    let overrides = ParameterOverrides {
        chant_enabled: Some(false),
        repeat_count: Some(2),
        ..Default::default()
    };
    let params = catalog
        .resolve_with_overrides(Some(SLOW_CHANT_PRESET), &overrides)
        .unwrap();

    assert_eq!(params.vowel_mode, VowelMode::Long);
    let out = build_final_text("sun rises", &params).unwrap();
    assert_eq!(out.as_str(), "SUUN riisees. . ".repeat(2));
}

#[test]
fn test_chant_strips_staccato_separator() {
    let params = ParameterSet::builder()
        .style(Style::Staccato)
        .chant_enabled(true)
        .build()
        .unwrap();
    let out = build_final_text("a b c", &params).unwrap();
    assert_eq!(out.as_str(), "a ~ b ~ c. . ");
}

#[test]
fn test_markup_then_profile() {
    let params = ParameterSet::builder()
        .vowel_mode(VowelMode::Long)
        .stress_first(true)
        .build()
        .unwrap();
    let out = build_final_text("say *hi* [repeat=2]", &params).unwrap();
    assert_eq!(out.as_str(), "SAAY hii! hii!. . ");
}

#[test]
fn test_repeat_scope_option() {
    let pipeline = ProsodyPipeline::new(PipelineOptions {
        repeat_scope: RepeatScope::Phrase,
        stress_suffix: false,
    });
    let out = pipeline
        .build("Listen, sun rises [repeat=2]", &ParameterSet::default())
        .unwrap();
    assert_eq!(out.as_str(), "Listen, sun rises sun rises. . ");
}

#[test]
fn test_stress_suffix_option() {
    let pipeline = ProsodyPipeline::new(PipelineOptions {
        repeat_scope: RepeatScope::Word,
        stress_suffix: true,
    });
    let params = ParameterSet::builder().stress_first(true).build().unwrap();
    let out = pipeline.build("hello world", &params).unwrap();
    assert_eq!(out.as_str(), "HELLO! world. . ");
}

#[test]
fn test_empty_input_is_rejected_before_validation() {
    let mut params = ParameterSet::default();
    params.tempo_bpm = 0;

    assert!(matches!(
        build_final_text("  ", &params),
        Err(ProsodyError::EmptyInput)
    ));
    assert!(matches!(
        build_final_text("hi", &params),
        Err(ProsodyError::Configuration(_))
    ));
}

#[test]
fn test_out_of_range_override_is_configuration_error() {
    let catalog = PresetCatalog::builtin();
    for overrides in [
        ParameterOverrides {
            tempo_bpm: Some(59),
            ..Default::default()
        },
        ParameterOverrides {
            repeat_count: Some(6),
            ..Default::default()
        },
        ParameterOverrides {
            cluster_pause_ms: Some(-1),
            ..Default::default()
        },
    ] {
        let result = catalog.resolve_with_overrides(None, &overrides);
        assert!(
            matches!(result, Err(ProsodyError::Configuration(_))),
            "{overrides:?} should be rejected"
        );
    }
}

#[test]
fn test_unknown_preset_lists_available_names() {
    let err = PresetCatalog::builtin().resolve("Opera").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Opera"));
    assert!(message.contains(SLOW_CHANT_PRESET));
}

#[test]
fn test_pipeline_is_deterministic() {
    let params = preset("Staccato Drill");
    let first = build_final_text("one two [pause=300] three", &params).unwrap();
    let second = build_final_text("one two [pause=300] three", &params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stress_skips_leading_pause() {
    let params = ParameterSet::builder().stress_first(true).build().unwrap();
    let out = build_final_text("[pause=500] hello world", &params).unwrap();
    assert_eq!(out.as_str(), ". . HELLO world. . ");
}

#[test]
fn test_clipped_command_around_inline_pause() {
    let out = build_final_text("a [pause=500] b", &preset("Clipped Command")).unwrap();
    assert_eq!(out.as_str(), "A! . . b. . ");
}

#[test]
fn test_stacked_repeats_are_bounded() {
    let text = format!("drum{}", " [repeat=20]".repeat(10));
    for scope in [RepeatScope::Phrase, RepeatScope::Preceding] {
        let pipeline = ProsodyPipeline::new(PipelineOptions {
            repeat_scope: scope,
            stress_suffix: false,
        });
        let out = pipeline.build(&text, &ParameterSet::default()).unwrap();
        assert!(
            out.as_str().len() < MAX_EXPANDED_BYTES + text.len(),
            "{scope} grew to {} bytes",
            out.as_str().len()
        );
        assert!(out.as_str().contains("[repeat=20]"));
    }
}
