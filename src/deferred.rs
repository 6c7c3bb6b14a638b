
//! Output that is only rendered once the form body is done.
//!
//! Blueprints have to appear after the live rows of their association and outside the
//! form element itself, so they are queued while the body renders and flushed afterwards.

use std::fmt;

use tracing::{ debug, trace };

use crate::error::{ Error };
use crate::markup::{ Markup };
use crate::text;

/// A queued piece of output.
pub type DeferredTask<'f> = Box<dyn FnOnce() -> Result<Markup, Error> + 'f>;

/// Ordered queue of deferred tasks, one per association.
///
/// # Examples
///
/// ```
/// # fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use nested_fields::{ DeferredEmitter, Markup };
///
/// let mut emitter = DeferredEmitter::new();
/// emitter.register("tasks".parse()?, Box::new(|| Ok(Markup::from_raw("<div>first</div>"))));
/// emitter.register("tasks".parse()?, Box::new(|| Ok(Markup::from_raw("<div>second</div>"))));
///
/// assert_eq!(emitter.flush()?.to_string(), "<div>second</div>");
/// # Ok(()) }
/// # fn main() { run().unwrap() }
/// ```
#[derive(Default)]
pub struct DeferredEmitter<'f> {
    tasks: Vec<(text::Identifier, DeferredTask<'f>)>,
}

impl<'f> DeferredEmitter<'f> {

    /// An empty queue.
    pub fn new() -> DeferredEmitter<'f> {
        DeferredEmitter { tasks: Vec::new() }
    }

    /// Queue a task for an association.
    ///
    /// A task already queued for the same association is dropped and the new one is
    /// queued last. Returns whether a task was replaced.
    pub fn register(&mut self, association: text::Identifier, task: DeferredTask<'f>) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(queued, _)| !queued.is_exactly(&association));
        let replaced = self.tasks.len() != before;
        if replaced {
            debug!(association = %association, "replacing deferred blueprint task");
        } else {
            debug!(association = %association, "registering deferred blueprint task");
        }
        self.tasks.push((association, task));
        replaced
    }

    /// Associations with a queued task, in flush order.
    pub fn pending(&self) -> Vec<&text::Identifier> {
        self.tasks.iter().map(|(association, _)| association).collect()
    }

    /// Whether no task is queued.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every queued task once, in order, and concatenate their output.
    ///
    /// Stops at the first failing task.
    pub fn flush(self) -> Result<Markup, Error> {
        debug!(count = self.tasks.len(), "flushing deferred blueprint tasks");
        let mut output = Markup::new();
        for (association, task) in self.tasks {
            trace!(association = %association, "running deferred blueprint task");
            output.append(task()?);
        }
        Ok(output)
    }
}

impl<'f> fmt::Debug for DeferredEmitter<'f> {

    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("DeferredEmitter")
            .field("pending", &self.pending())
            .finish()
    }
}
