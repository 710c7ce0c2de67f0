//! # ida-enroll: Registration and Login Orchestration
//!
//! The orchestrators own the two request flows of the stack and compose
//! the crypto and ledger crates; they hold no per-request state of their
//! own. Everything that must survive between steps travels inside a
//! stateless signed claim or inside the holder's own package.
//!
//! ## Registration
//!
//! `AwaitingEmail → AwaitingEmailConfirmation → AwaitingPassphrase →
//! HashesComputed → Signed → Anchored | AnchorUnconfirmed → Complete`,
//! realized as [`RegistrationFlow::begin`], [`RegistrationFlow::confirm`],
//! and [`RegistrationFlow::complete`]. The outcome is an
//! [`IdentityPackage`] owned solely by the holder; the stack retains no
//! copy. Anchoring failure still yields the signed package, marked
//! [`AnchorState::NotAnchored`].
//!
//! ## Login
//!
//! `PackagePresented → SignatureChecked → ProofChecked → SessionIssued`,
//! realized as [`LoginFlow::login`]. Rejections are terminal and disclose
//! nothing beyond signature-versus-proof.

pub mod claims;
pub mod error;
pub mod login;
pub mod mailer;
pub mod package;
pub mod policy;
pub mod register;

pub use claims::{Claim, ClaimsKeeper};
pub use error::{ClaimError, LoginError, MailerError, RegistrationError};
pub use login::{LoginFlow, SessionGrant};
pub use mailer::{ConfirmationMailer, FailingMailer, RecordingMailer};
pub use package::{AnchorState, IdentityPackage, PresentedPackage};
pub use policy::{check_passphrase, normalize_email, EmailError, PolicyViolation};
pub use register::{ConfirmedEmail, EnrollConfig, RegistrationFlow};
