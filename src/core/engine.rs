use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs the three pipeline stages in order: assemble the roster, draw the
/// assignment, deliver the letters. All-or-nothing: delivery is only reached
/// with a fully validated assignment.
pub struct ExchangeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExchangeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        ExchangeEngine { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Assembling roster...");
        let roster = self.pipeline.assemble()?;
        tracing::info!("Assembled roster of {} participants", roster.len());

        tracing::info!("Drawing lots...");
        let assignment = self.pipeline.draw(&roster)?;
        tracing::info!("Drew {} giver/recipient pairs", assignment.len());

        tracing::info!("Delivering letters...");
        let output = self.pipeline.deliver(&assignment)?;
        tracing::info!("Letters delivered to: {}", output);

        Ok(output)
    }
}
