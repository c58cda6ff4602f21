//! Human-readable trace output
//!
//! ```text
//! Step 3: A=5 B=1 C=0 D=0 RES=6 PC=3 CarryFlag=false ZeroFlag=false
//! RES = 6
//! ```

use crate::observer::{Observer, PrintRecord, Snapshot};
use crate::state::HaltReason;
use scpu_spec::Register;
use std::io::{self, Write};
use std::ops::ControlFlow;

/// Observer that writes one line per step and per PRINT to `out`.
///
/// Write failures stop the run; the first error is kept and returned by
/// [`TraceRenderer::finish`].
pub struct TraceRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TraceRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and hand back the writer
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) -> ControlFlow<()> {
        if self.error.is_some() {
            return ControlFlow::Break(());
        }
        match self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => {
                self.error = Some(err);
                ControlFlow::Break(())
            }
        }
    }
}

/// Format a snapshot as a single trace line
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    format!(
        "Step {}: A={} B={} C={} D={} RES={} PC={} CarryFlag={} ZeroFlag={}",
        snapshot.step,
        snapshot.reg(Register::A),
        snapshot.reg(Register::B),
        snapshot.reg(Register::C),
        snapshot.reg(Register::D),
        snapshot.reg(Register::Res),
        snapshot.pc,
        snapshot.carry,
        snapshot.zero,
    )
}

impl<W: Write> Observer for TraceRenderer<W> {
    fn on_step(&mut self, snapshot: &Snapshot) -> ControlFlow<()> {
        let line = format_snapshot(snapshot);
        self.emit(format_args!("{}", line))
    }

    fn on_print(&mut self, record: &PrintRecord) {
        let _ = self.emit(format_args!("{} = {}", record.register, record.value));
    }

    fn on_halt(&mut self, _snapshot: &Snapshot, reason: HaltReason) {
        match reason {
            HaltReason::StepLimit => {
                let _ = self.emit(format_args!("Max steps reached, stopping run."));
            }
            HaltReason::Cancelled => {
                let _ = self.emit(format_args!("Processing stopped by user"));
            }
            HaltReason::Completed | HaltReason::ObserverStop => {}
        }
    }
}
