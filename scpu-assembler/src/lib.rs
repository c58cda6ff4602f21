//! SCPU Assembler
//!
//! Turn SCPU source text into a [`Program`](scpu_spec::Program): strip
//! comments, bind labels to instruction indices and keep the instruction
//! lines as text for the VM to decode.
//!
//! ## Example
//!
//! ```rust
//! use scpu_assembler::assemble;
//!
//! let source = r#"
//!     LOAD 3 A
//! loop:
//!     SUB A B     ; B is 0 until set
//!     JNZ loop
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.len(), 3);
//! assert_eq!(program.label("loop"), Some(1));
//! ```

pub mod error;
pub mod assembler;
pub mod check;

pub use error::{AssemblerError, Result};
pub use assembler::{assemble, assemble_file, assemble_listing, Listing};
pub use check::{check, Diagnostic};
