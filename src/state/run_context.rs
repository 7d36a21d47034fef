// ============================================================================
// RUN CONTEXT - Contador de finalización por inicialización
// ============================================================================
// Un RunContext nuevo por cada intento de inicialización. Lifetime/RunGuard
// marcan cada intento con una generación: al desmontar o cambiar la lista,
// las resoluciones en vuelo de la generación anterior se abandonan.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::ResolutionOutcome;

/// Resultado de registrar una tienda
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Counted,
    /// Esta tienda cerró la cuenta (se devuelve una sola vez)
    Completed,
    /// La tienda ya estaba contada
    Duplicate,
    OutOfRange,
}

#[derive(Debug)]
pub struct RunContext {
    generation: u64,
    expected: usize,
    settled: RefCell<Vec<bool>>,
    succeeded: Cell<usize>,
    failed: Cell<usize>,
}

impl RunContext {
    pub fn new(generation: u64, expected: usize) -> Self {
        Self {
            generation,
            expected,
            settled: RefCell::new(vec![false; expected]),
            succeeded: Cell::new(0),
            failed: Cell::new(0),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.get()
    }

    pub fn failed(&self) -> usize {
        self.failed.get()
    }

    pub fn completed(&self) -> usize {
        self.succeeded() + self.failed()
    }

    pub fn is_complete(&self) -> bool {
        self.completed() == self.expected
    }

    /// Cuenta la tienda `index` como máximo una vez
    pub fn record(&self, index: usize, outcome: &ResolutionOutcome) -> Recorded {
        {
            let mut settled = self.settled.borrow_mut();
            match settled.get_mut(index) {
                None => return Recorded::OutOfRange,
                Some(true) => return Recorded::Duplicate,
                Some(slot) => *slot = true,
            }
        }

        let counter = if outcome.is_resolved() {
            &self.succeeded
        } else {
            &self.failed
        };
        counter.set(counter.get() + 1);

        if self.is_complete() {
            Recorded::Completed
        } else {
            Recorded::Counted
        }
    }
}

/// Vida activa del componente. Cada `begin` invalida los guards anteriores
#[derive(Debug, Clone, Default)]
pub struct Lifetime {
    current: Rc<Cell<u64>>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RunGuard {
        let generation = self.current.get() + 1;
        self.current.set(generation);
        RunGuard {
            generation,
            current: self.current.clone(),
        }
    }

    /// Teardown: todo lo que esté en vuelo pasa a ser obsoleto
    pub fn end(&self) {
        self.current.set(self.current.get() + 1);
    }
}

#[derive(Debug, Clone)]
pub struct RunGuard {
    generation: u64,
    current: Rc<Cell<u64>>,
}

impl RunGuard {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        self.current.get() == self.generation
    }
}
