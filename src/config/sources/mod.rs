pub mod environment;
pub mod scoped_environment;
