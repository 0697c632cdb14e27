//! Home-design lead intake.
//!
//! Drives the three-step wizard around the `canvas` room sketcher: contact
//! details with an emailed one-time code, one or more spaces with sketches
//! and attachments, then a meeting slot. Submission uploads files, stores the
//! lead and sends confirmation email.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | Supabase storage/table client and Resend mailer |
//! | [`config`] | Environment-driven settings |
//! | [`retry`] | Linear-backoff retry for async calls |
//! | [`space`] | A room being designed and its persisted record |
//! | [`submit`] | Backend seams and the submission pipeline |
//! | [`telemetry`] | Tracing subscriber setup |
//! | [`verify`] | Email one-time codes |
//! | [`wizard`] | Wizard state and its immutable edits |

pub mod backend;
pub mod config;
pub mod retry;
pub mod space;
pub mod submit;
pub mod telemetry;
pub mod verify;
pub mod wizard;
