use std::cell::Cell;

/// Debounce по поколениям: каждый ввод получает номер, по истечении паузы
/// срабатывает только тот, чей номер остался последним
#[derive(Debug, Default)]
pub struct DebounceGate {
    generation: Cell<u64>,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.get() == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_ticket_fires() {
        let gate = DebounceGate::new();
        let first = gate.trigger();
        let second = gate.trigger();
        let third = gate.trigger();

        assert!(!gate.is_current(first));
        assert!(!gate.is_current(second));
        assert!(gate.is_current(third));
    }
}
