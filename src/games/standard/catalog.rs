//! Standard chemistry catalog content.

use crate::cards::{
    CatalogDefinition, CompoundDef, EffectDef, ElementDef, ElementGroup, ReactionDef, SpecialRule,
};

use ElementGroup::*;

const ELEMENTS: &[(&str, &str, i8, ElementGroup)] = &[
    ("H", "Hydrogen", 1, Nonmetal),
    ("Li", "Lithium", 1, AlkaliMetal),
    ("Na", "Sodium", 1, AlkaliMetal),
    ("K", "Potassium", 1, AlkaliMetal),
    ("Rb", "Rubidium", 1, AlkaliMetal),
    ("Mg", "Magnesium", 2, AlkalineEarthMetal),
    ("Ca", "Calcium", 2, AlkalineEarthMetal),
    ("Fe", "Iron", 3, TransitionMetal),
    ("Cu", "Copper", 2, TransitionMetal),
    ("Al", "Aluminium", 3, PostTransitionMetal),
    ("C", "Carbon", 4, Nonmetal),
    ("Si", "Silicon", 4, Metalloid),
    ("N", "Nitrogen", -3, Nonmetal),
    ("O", "Oxygen", -2, Nonmetal),
    ("S", "Sulfur", -2, Nonmetal),
    ("F", "Fluorine", -1, Halogen),
    ("Cl", "Chlorine", -1, Halogen),
];

fn receive(symbol: &str, count: u32) -> EffectDef {
    EffectDef::ReceiveElements {
        symbol: symbol.to_string(),
        count,
    }
}

/// The definition in catalog order.
pub fn definition() -> CatalogDefinition {
    let mut def = CatalogDefinition::new();
    for (symbol, name, oxidation, group) in ELEMENTS {
        def = def.with_element(ElementDef::new(*symbol, *name, *oxidation, *group));
    }

    def
        // Exact compounds
        .with_compound(
            CompoundDef::exact("H2O", "Water", &[("H", 2), ("O", 1)])
                .with_effect(EffectDef::DrawElements(1)),
        )
        .with_compound(CompoundDef::exact("H2", "Hydrogen Gas", &[("H", 2)]))
        .with_compound(CompoundDef::exact("O2", "Oxygen Gas", &[("O", 2)]))
        .with_compound(CompoundDef::exact("N2", "Nitrogen Gas", &[("N", 2)]))
        .with_compound(
            CompoundDef::exact("NaCl", "Table Salt", &[("Na", 1), ("Cl", 1)])
                .with_effect(receive("Na", 1)),
        )
        .with_compound(
            CompoundDef::exact("HCl", "Hydrochloric Acid", &[("H", 1), ("Cl", 1)])
                .with_effect(EffectDef::ForceOpponentDiscard(2)),
        )
        .with_compound(
            CompoundDef::exact("HF", "Hydrofluoric Acid", &[("H", 1), ("F", 1)])
                .with_effect(EffectDef::SwapHands),
        )
        .with_compound(
            CompoundDef::exact("NaOH", "Sodium Hydroxide", &[("Na", 1), ("O", 1), ("H", 1)])
                .with_effect(EffectDef::DiscardAndRedraw(3)),
        )
        .with_compound(
            CompoundDef::exact("CO2", "Carbon Dioxide", &[("C", 1), ("O", 2)])
                .with_effect(EffectDef::SkipOpponentTurn),
        )
        .with_compound(
            CompoundDef::exact("NH3", "Ammonia", &[("N", 1), ("H", 3)])
                .with_effect(EffectDef::DrawElements(2)),
        )
        .with_compound(
            CompoundDef::exact("H2O2", "Hydrogen Peroxide", &[("H", 2), ("O", 2)])
                .with_effect(EffectDef::NegateNextDissolution),
        )
        .with_compound(
            CompoundDef::exact("O3", "Ozone", &[("O", 3)])
                .with_effect(EffectDef::DissolveOpponentCompounds(1)),
        )
        .with_compound(CompoundDef::exact("SiO2", "Silica", &[("Si", 1), ("O", 2)]))
        .with_compound(
            CompoundDef::exact("H2S", "Hydrogen Sulfide", &[("H", 2), ("S", 1)])
                .with_effect(receive("S", 1)),
        )
        // Structural compounds
        .with_compound(
            CompoundDef::special("M", "Metallic Bond", SpecialRule::Metallic)
                .with_effect(EffectDef::DrawElements(1))
                .persistent(),
        )
        .with_compound(
            CompoundDef::special("MH", "Metal Hydride", SpecialRule::MetalHydride)
                .with_effect(receive("H", 2)),
        )
        .with_compound(
            CompoundDef::special("CH4", "Hydrocarbon", SpecialRule::Hydrocarbon)
                .with_effect(EffectDef::DrawElements(2)),
        )
        .with_compound(CompoundDef::special("C4", "Diamond", SpecialRule::NetworkSolid))
        .with_compound(CompoundDef::special("MO", "Metal Oxide", SpecialRule::MetalOxide))
        // Reactions
        .with_reaction(
            ReactionDef::new("Combustion", &[("CH4", 1), ("O2", 2)])
                .producing(&["CO2", "H2O", "H2O"])
                .banishing(),
        )
        .with_reaction(
            ReactionDef::new("Neutralization", &[("HCl", 1), ("NaOH", 1)])
                .producing(&["NaCl", "H2O"])
                .banishing(),
        )
        .with_reaction(
            ReactionDef::new("Electrolysis", &[("H2O", 2)])
                .producing(&["H2", "H2", "O2"])
                .banishing()
                .ending_turn()
                .with_reaction_limit(1),
        )
        .with_reaction(
            ReactionDef::new("Haber Process", &[("N2", 1), ("H2", 3)])
                .producing(&["NH3", "NH3"])
                .banishing(),
        )
        .with_reaction(
            ReactionDef::new("Salt Decomposition", &[("NaCl", 1)])
                .releasing(&["Na", "Cl"])
                .banishing(),
        )
        .with_reaction(
            ReactionDef::new("Peroxide Decomposition", &[("H2O2", 2)])
                .producing(&["H2O", "H2O", "O2"])
                .banishing()
                .with_reaction_limit(3),
        )
        .with_reaction(
            ReactionDef::new("Photosynthesis", &[("CO2", 1), ("H2O", 1)])
                .producing(&["O2"])
                .releasing(&["C"])
                .banishing(),
        )
}
