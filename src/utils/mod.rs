pub mod seq;

pub use seq::{complement, rev_comp, to_atgcn, to_atgcn_and_gap};
