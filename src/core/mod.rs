pub mod generator;
pub mod prosody;
pub mod synthesis;

pub use generator::{GeneratedSpeech, SpeechGenerator};
pub use prosody::{
    FinalText, ParameterOverrides, ParameterSet, PipelineOptions, PresetCatalog, ProsodyPipeline,
    RepeatScope, Style, VowelMode, build_final_text, encode_pause,
};
pub use synthesis::{
    BoxedSynthesisAdapter, SynthesisAdapter, SynthesisConfig, SynthesisError, SynthesisResult,
    create_synthesis_adapter,
};
