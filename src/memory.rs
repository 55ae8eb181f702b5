/// Memory keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryAction {
    Clear,
    Recall,
    Add,
    Subtract,
}

impl MemoryAction {
    pub const ALL: [MemoryAction; 4] = [
        MemoryAction::Clear,
        MemoryAction::Recall,
        MemoryAction::Add,
        MemoryAction::Subtract,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::Clear => "mc",
            Self::Recall => "mr",
            Self::Add => "mplus",
            Self::Subtract => "mminus",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.token() == token)
    }
}

/// Single accumulator that outlives clears and mode switches.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryRegister {
    value: f64,
}

impl MemoryRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    pub fn add(&mut self, amount: f64) {
        self.value += amount;
    }

    pub fn subtract(&mut self, amount: f64) {
        self.value -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates() {
        let mut memory = MemoryRegister::new();
        memory.add(5.0);
        memory.add(2.5);
        memory.subtract(10.0);
        assert_eq!(memory.value(), -2.5);
        memory.clear();
        assert_eq!(memory.value(), 0.0);
    }

    #[test]
    fn tokens_round_trip() {
        for action in MemoryAction::ALL {
            assert_eq!(MemoryAction::from_token(action.token()), Some(action));
        }
        assert_eq!(MemoryAction::from_token("ms"), None);
    }
}
