pub mod curves;
pub mod keyframing;
