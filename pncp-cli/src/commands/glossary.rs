//! `pncp glossary`

/// Bidding modalities as they appear in `modalidade_licitacao_nome`, with a
/// short description of each.
pub const MODALITIES: &[(&str, &str)] = &[
    (
        "Concorrência",
        "Used for the largest contracts, open to any bidder. The broadest procedure, \
         required for works and services above the legal thresholds.",
    ),
    (
        "Tomada de Preços",
        "For mid-range values. Only suppliers registered in advance, or meeting the \
         conditions up to 3 days before the proposal, may bid.",
    ),
    (
        "Convite",
        "The simplest procedure, for small values. The administration invites at \
         least 3 suppliers in the field.",
    ),
    (
        "Pregão Presencial",
        "Reverse auction held in person for common goods and services. Bidders \
         lower their prices in open rounds.",
    ),
    (
        "Pregão Eletrônico",
        "Same as the in-person auction but run online, which widens competition and \
         transparency. Very common in public purchasing.",
    ),
    (
        "Concurso",
        "Selects technical, scientific or artistic work in exchange for prizes or \
         remuneration.",
    ),
    (
        "Leilão",
        "Sells unusable movable goods, seized products or real estate to settle debts.",
    ),
    (
        "Dispensa",
        "Bidding is waived by law in specific cases, such as small values or \
         emergencies.",
    ),
    (
        "Inexigibilidade",
        "Competition is impossible, for example a specialist of recognized expertise \
         or an exclusive supplier.",
    ),
    (
        "Regime Diferenciado de Contratação (RDC)",
        "Created by law to speed up procurement, mostly for infrastructure works and \
         large events.",
    ),
    (
        "Diálogo Competitivo",
        "A recent modality for complex purchases, where the administration talks \
         with participants to define the solution.",
    ),
];

const NOTE: &str = "Many PNCP records name the auction `Pregão - Eletrônico` or `Pregão Presencial`. \
                    `Dispensa` and `Inexigibilidade` are not bidding modalities in the strict sense \
                    but legal grounds for direct contracting.";

pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    let mut out = String::new();
    for (name, description) in MODALITIES {
        out.push_str(name);
        out.push('\n');
        out.push_str("  ");
        out.push_str(description);
        out.push_str("\n\n");
    }
    out.push_str("Note: ");
    out.push_str(NOTE);
    out.push('\n');
    out
}
