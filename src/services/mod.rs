pub mod anti_detection;
pub mod challenge_gate;
pub mod output_writer;

pub use anti_detection::{AntiDetection, EvasionPlan};
pub use challenge_gate::ChallengeGate;
pub use output_writer::OutputWriter;
