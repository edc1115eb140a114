use clap::Args;

#[derive(Args, Clone, Copy, Debug, Default, PartialEq)]
pub struct NullSettings {}
