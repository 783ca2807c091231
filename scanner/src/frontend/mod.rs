pub mod synth;

pub use synth::{SynthConfig, SynthFrontend, ToneSpec};
