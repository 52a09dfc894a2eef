use std::fmt;

const SYMBOLS: [&str; 19] = [
    "n", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar",
];

/// Proton/neutron composition used to seed a nucleus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Nuclide {
    pub protons: u32,
    pub neutrons: u32,
}

impl Nuclide {
    pub const HYDROGEN_1: Nuclide = Nuclide::new(1, 0);
    pub const HELIUM_4: Nuclide = Nuclide::new(2, 2);
    pub const CARBON_14: Nuclide = Nuclide::new(6, 8);
    pub const NITROGEN_14: Nuclide = Nuclide::new(7, 7);

    pub const fn new(protons: u32, neutrons: u32) -> Self {
        Self { protons, neutrons }
    }

    pub fn mass_number(&self) -> u32 {
        self.protons + self.neutrons
    }

    /// Daughter composition after emitting a helium-4 nucleus, if possible.
    pub fn after_alpha(&self) -> Option<Nuclide> {
        Some(Nuclide::new(
            self.protons.checked_sub(2)?,
            self.neutrons.checked_sub(2)?,
        ))
    }

    /// Daughter composition after a beta decay turns a proton into a neutron.
    pub fn after_beta(&self) -> Option<Nuclide> {
        Some(Nuclide::new(self.protons.checked_sub(1)?, self.neutrons + 1))
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match SYMBOLS.get(self.protons as usize) {
            Some(symbol) => write!(f, "{symbol}-{}", self.mass_number()),
            None => write!(f, "Z={} N={}", self.protons, self.neutrons),
        }
    }
}
