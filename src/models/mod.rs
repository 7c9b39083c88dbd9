pub mod condition;
pub mod enums;
pub mod symptom;
pub mod vital_sign;
pub mod weather;

pub use condition::*;
pub use enums::*;
pub use symptom::*;
pub use vital_sign::*;
pub use weather::*;
