pub mod credentials;
pub mod normalize;
pub mod prompt;
pub mod providers;

pub use credentials::{CredentialSource, EnvCredential, StaticCredential};
pub use providers::gemini::GeminiClient;
pub use providers::{ContentProvider, ProviderError, UpstreamResponse};
