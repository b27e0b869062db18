//! Matcher engine: loading animation, endpoint strategies and submission IO.
mod animation;
mod engine;
mod pipeline;
mod response;
mod submit;
mod types;

pub use animation::{run_animation, AnimationSchedule};
pub use engine::EngineHandle;
pub use pipeline::run_analysis;
pub use submit::{Endpoint, EndpointKind, ReqwestSubmitter, SubmitSettings, Submitter, FILE_FIELD};
pub use types::{
    ChannelEventSink, EngineEvent, EventSink, FailureKind, Marker, MatchRecord, SubmitError,
    SubmitOutcome, UploadFile,
};
