pub mod fixed;
pub mod placeholder;
pub mod table;
pub mod traits;

pub use fixed::FixedProof;
pub use placeholder::PlaceholderProof;
pub use table::ProofTable;
pub use traits::ProofSource;
