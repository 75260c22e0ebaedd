//! The diagnostic coordinator collects diagnostics as they're produced, and
//! hands them to an emitter in a sensible order when asked.

use crate::emitter::Emitter;
use crate::{Diagnostic, InputCoordinator, Level};

#[derive(Debug, Default)]
pub struct DiagnosticCoordinator {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCoordinator {
    pub fn register(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Have any errors been registered? Warnings and notes don't count.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.get_level() == Level::Error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Emit every registered diagnostic, sorted by input and then location,
    /// and clear them out.
    pub fn emit(
        &mut self,
        emitter: &mut dyn Emitter,
        inputs: &InputCoordinator,
    ) -> std::io::Result<()> {
        self.diagnostics
            .sort_by_key(|d| (d.get_input(), d.get_location()));

        for d in self.diagnostics.drain(..) {
            emitter.emit(&d, inputs)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Caret;

    #[derive(Default)]
    struct Collect(Vec<String>);

    impl Emitter for Collect {
        fn emit(
            &mut self,
            d: &Diagnostic,
            _: &InputCoordinator,
        ) -> std::io::Result<()> {
            self.0.push(d.get_text().to_owned());
            Ok(())
        }
    }

    #[test]
    fn emits_in_source_order() {
        let mut inputs = InputCoordinator::default();
        let id = inputs.eval_input("a b c".into());

        let mut coordinator = DiagnosticCoordinator::default();
        coordinator.register(
            Diagnostic::new("second").input(id).location(Caret::new(0, 4)),
        );
        coordinator.register(
            Diagnostic::new("first").input(id).location(Caret::new(0, 2)),
        );
        assert!(coordinator.has_errors());

        let mut out = Collect::default();
        coordinator.emit(&mut out, &inputs).unwrap();
        assert_eq!(out.0, vec!["first", "second"]);
        assert!(coordinator.is_empty());
    }

    #[test]
    fn warnings_are_not_errors() {
        let mut coordinator = DiagnosticCoordinator::default();
        coordinator.register(Diagnostic::new("hmm").level(Level::Warning));
        assert!(!coordinator.has_errors());
        assert_eq!(coordinator.len(), 1);
    }
}
