use hack_common::{RAM_MAX, ROM_MAX, VARIABLE_BASE};

/// Memory limits the assembler allocates within.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Highest RAM address a variable may be bound to.
    pub ram_max: u16,
    /// Highest instruction address, for both labels and instructions.
    pub rom_max: u16,
    /// First RAM address handed out to variables.
    pub variable_base: u16,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            ram_max: RAM_MAX,
            rom_max: ROM_MAX,
            variable_base: VARIABLE_BASE,
        }
    }
}

impl AssemblerConfig {
    pub fn with_ram_max(mut self, ram_max: u16) -> Self {
        self.ram_max = ram_max;
        self
    }

    pub fn with_rom_max(mut self, rom_max: u16) -> Self {
        self.rom_max = rom_max;
        self
    }

    pub fn with_variable_base(mut self, variable_base: u16) -> Self {
        self.variable_base = variable_base;
        self
    }
}
