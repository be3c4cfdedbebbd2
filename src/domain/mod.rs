// Domain layer: the analysis record, replay reports, and the ports the pipeline runs against.

pub mod model;
pub mod ports;
