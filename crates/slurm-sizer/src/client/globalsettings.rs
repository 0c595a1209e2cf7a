use crate::client::output::outputs::Output;
use crate::common::manager::slurm::SqueueCommand;

pub struct GlobalSettings {
    squeue: SqueueCommand,
    printer: Box<dyn Output>,
}

impl GlobalSettings {
    pub fn new(squeue: SqueueCommand, printer: Box<dyn Output>) -> Self {
        GlobalSettings { squeue, printer }
    }

    pub fn squeue(&self) -> &SqueueCommand {
        &self.squeue
    }

    pub fn printer(&self) -> &dyn Output {
        self.printer.as_ref()
    }
}
