//! Printer session
//!
//! Owns the bound receipt printer. A session starts Unbound (or Bound when a
//! printer name is configured), binds to the first discovered candidate on
//! demand and then keeps that binding for its whole lifetime.

use super::renderer::ReceiptRenderer;
use asg_printer::{PrintError, PrintResult, PrinterDiscovery, SpoolDispatcher, Spooler};
use shared::models::Sale;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

pub struct PrinterSession<S: Spooler> {
    spooler: S,
    discovery: PrinterDiscovery,
    dispatcher: SpoolDispatcher,
    renderer: ReceiptRenderer,
    /// Bound printer; the lock is held for a whole print job
    target: Mutex<Option<String>>,
}

impl<S: Spooler> PrinterSession<S> {
    /// Create an unbound session
    pub fn new(
        spooler: S,
        discovery: PrinterDiscovery,
        dispatcher: SpoolDispatcher,
        renderer: ReceiptRenderer,
    ) -> Self {
        Self {
            spooler,
            discovery,
            dispatcher,
            renderer,
            target: Mutex::new(None),
        }
    }

    /// Bind to `target` up front, skipping discovery
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        let target = target.into();
        info!(printer = %target, "Using configured printer");
        self.target = Mutex::new(Some(target));
        self
    }

    pub fn spooler(&self) -> &S {
        &self.spooler
    }

    /// Currently bound printer, if any
    pub async fn target(&self) -> Option<String> {
        self.target.lock().await.clone()
    }

    pub async fn is_bound(&self) -> bool {
        self.target.lock().await.is_some()
    }

    /// Run discovery and bind to the first candidate.
    ///
    /// Always queries the spooler, even when already bound. When nothing is
    /// found the current binding is left as it was.
    #[instrument(skip(self))]
    pub async fn init(&self) -> PrintResult<String> {
        let mut slot = self.target.lock().await;
        self.discover_and_bind(&mut slot).await
    }

    /// Raw discovery query, no binding
    pub async fn list_printers(&self) -> PrintResult<Vec<String>> {
        self.discovery.list_candidates(&self.spooler).await
    }

    /// Render `sale` and print it on the bound printer, binding first if needed
    #[instrument(skip(self, sale), fields(order_id = sale.order_id))]
    pub async fn print_receipt(&self, sale: &Sale) -> PrintResult<()> {
        let mut slot = self.target.lock().await;

        let target = match slot.as_ref() {
            Some(target) => target.clone(),
            None => self.discover_and_bind(&mut slot).await?,
        };

        let data = self.renderer.render(sale)?;
        info!(printer = %target, bytes = data.len(), "Printing receipt");

        self.dispatcher.send(&self.spooler, &target, &data).await
    }

    async fn discover_and_bind(&self, slot: &mut Option<String>) -> PrintResult<String> {
        let candidates = self.discovery.list_candidates(&self.spooler).await?;

        match candidates.into_iter().next() {
            Some(first) => {
                info!(printer = %first, "Printer bound");
                *slot = Some(first.clone());
                Ok(first)
            }
            None => {
                warn!(marker = %self.discovery.marker(), "No POS printer found");
                Err(PrintError::NoPrinterFound(self.discovery.marker().to_string()))
            }
        }
    }
}
