//! # SymptomX API
//!
//! REST surface for the SymptomX symptom checker.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /` | liveness |
//! | `GET /readyz` | readiness, 503 until the model is installed |
//! | `POST /predict` | rank diseases for `{"symptoms": [...]}` |
//! | `GET /symptoms` | recognized symptom vocabulary |
//! | `GET /diseases` | known disease labels |

pub mod rest;

pub use rest::{configure, AppState, RestApi};
