mod crime;
mod summary;

pub use crime::{
    Crime, CrimeChanges, CrimeStatus, CrimeType, Evidence, NewCrime, Severity, Suspect,
};
pub use summary::CrimeSummary;
