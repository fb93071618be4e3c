//! Manila Share Options Library
//!
//! Loads OpenStack credentials for Manila shares from Kubernetes secrets.
//!
//! The parameters in the secret are validated against a declarative schema
//! ([`validator`]) and collected into [`options::OpenStackOptions`], which
//! converts into Keystone authentication options for password or trust-scoped
//! authentication.
//!
//! ```no_run
//! use manila_share_options::options::OptionsLoader;
//! use manila_share_options::validator::ParameterMap;
//!
//! let loader = OptionsLoader::new()?;
//! let params = ParameterMap::from([
//!     ("os-authURL".to_string(), "http://keystone:5000/v3".to_string()),
//!     ("os-password".to_string(), "secret".to_string()),
//!     ("os-userName".to_string(), "manila".to_string()),
//!     ("os-domainName".to_string(), "Default".to_string()),
//!     ("os-projectName".to_string(), "service".to_string()),
//! ]);
//! let auth = loader.from_map(&params)?.to_auth_options();
//! # Ok::<(), manila_share_options::validator::ValidationError>(())
//! ```

pub mod config;
pub mod constants;
pub mod observability;
pub mod options;
pub mod secrets;
pub mod validator;

pub use options::{AuthOptions, AuthOptionsExt, OpenStackOptions, OptionsError, OptionsLoader};
pub use validator::{ParameterMap, ValidationError};
