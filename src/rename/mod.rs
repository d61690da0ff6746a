mod name_builder;
mod pipeline;
mod placer;
mod types;

pub use name_builder::{
    build_destination, build_plan, subtitle_destination, FormatError, MovieFormat,
    DEFAULT_MOVIE_FORMAT,
};
pub use pipeline::Pipeline;
pub use placer::Placer;
pub use types::{DestinationPlan, FileReport, FileStatus, PlacedFile, PlacementOutcome, RunReport};
