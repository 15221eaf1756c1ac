use uom::si::f64::Mass as UomMass;

pub type Mass = UomMass;

/// Metric tonnes (1000 kg).
#[inline]
pub fn tons(v: f64) -> Mass {
    use uom::si::mass::ton;
    Mass::new::<ton>(v)
}

#[inline]
pub fn as_tons(m: Mass) -> f64 {
    use uom::si::mass::ton;
    m.get::<ton>()
}

pub mod constants {
    use super::*;

    pub const AVOGADRO: f64 = 6.022_14e23;

    /// Atoms per gram-mole scaled to tonnes: N_A * 1e6 g/t.
    pub const ATOMS_PER_TON_MOLE: f64 = AVOGADRO * 1e6;

    /// Mass of `atoms` atoms of an isotope with the given mass number.
    ///
    /// The mass number stands in for the molar mass in g/mol.
    #[inline]
    pub fn atoms_to_mass(atoms: f64, mass_number: u32) -> Mass {
        tons(atoms * f64::from(mass_number) / ATOMS_PER_TON_MOLE)
    }
}
