/// Monotonic version of the interactive state.
///
/// Every observable state change (screen shown, session data replaced)
/// advances the generation. Work started under an older generation is stale.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// Captured at request issue time; checked again before the response is applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ticket<S> {
    pub scope: S,
    pub generation: Generation,
}

/// Tracks the active scope (e.g. a screen) and the current generation.
#[derive(Debug, Clone)]
pub struct GenerationGuard<S> {
    scope: S,
    generation: Generation,
}

impl<S: Copy + Eq> GenerationGuard<S> {
    pub fn new(scope: S) -> Self {
        Self {
            scope,
            generation: Generation::default(),
        }
    }

    pub fn scope(&self) -> S {
        self.scope
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Enters `scope` and advances the generation, even when the scope is unchanged.
    pub fn enter(&mut self, scope: S) -> Generation {
        self.scope = scope;
        self.advance()
    }

    pub fn advance(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.generation
    }

    pub fn issue(&self) -> Ticket<S> {
        Ticket {
            scope: self.scope,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: &Ticket<S>) -> bool {
        ticket.scope == self.scope && ticket.generation == self.generation
    }
}
