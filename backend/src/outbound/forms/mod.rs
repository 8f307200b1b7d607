//! Hosted form adapters for place suggestions.

mod formspree;

pub use formspree::{DEFAULT_FORM_ENDPOINT, DEFAULT_FORM_ID, FormspreeSetupError, FormspreeSubmitter};
