// Student profile: the value type, pure field updates, validation and the
// marksheet image attachment. No I/O and no session state live here.

pub mod image;
pub mod models;
pub mod update;
pub mod validation;
