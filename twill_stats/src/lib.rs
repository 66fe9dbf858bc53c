#![warn(unused_extern_crates)]
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]
mod crp;
pub mod dist;
mod partition;
pub mod prior;
mod suffstat;

pub use crp::Crp;
pub use partition::{cluster_counts, LabelTable, PartitionDiagnostics};
pub use suffstat::{GaussianSuffStat, MvGaussianSuffStat};
