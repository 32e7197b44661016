pub mod endometriosis;

use crate::catalog::ModelVariant;

/// All variants compiled into this build, in display order.
pub fn builtin_variants() -> Vec<ModelVariant> {
    vec![endometriosis::variant()]
}
