//! # Documento de Demonstração
//!
//! Um besluit municipal flamengo fictício, usado pela rota `/ner/demo` para
//! exercitar o fluxo completo de extração sem depender do triplestore. O
//! texto é representativo do corpus real: cabeçalho institucional, lista de
//! presentes com títulos, referências legais datadas e itens numerados.

/// Besluit do Colégio de Burgemeester en Schepenen da fictícia Gemeente
/// Zonnedorp.
pub const GENT_BESLUIT: &str = "\
Gemeente Zonnedorp
College van Burgemeester en Schepenen

Besluit van het College
Datum: 12 februari 2025

Aanwezig:
- Jan Peeters, Burgemeester
- Annelies De Smet, Schepen van Financiën
- Tom Willems, Schepen van Openbare Werken
- Els Van Damme, Secretaris

Onderwerp: Goedkeuring van het reglement inzake gebruik van gemeentelijke sportinfrastructuur

Het College van Burgemeester en Schepenen,

Gelet op het gemeentedecreet van 22 december 2017;
Gelet op het besluit van de gemeenteraad van 15 oktober 2023 betreffende het gebruik van gemeentelijke infrastructuur;
Overwegende dat er nood is aan een uniform reglement voor het gebruik van sporthallen en sportterreinen;

Besluit:
1. Het reglement inzake het gebruik van gemeentelijke sportinfrastructuur wordt goedgekeurd.
2. Dit reglement treedt in werking op 1 maart 2025.
3. Een afschrift van dit besluit wordt bezorgd aan de gemeenteraad en gepubliceerd op de website van de gemeente.
";
