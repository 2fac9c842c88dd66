//! Bundled sample document for demos and smoke tests.

use crate::document::Document;

pub const EPA_SAMPLE_FILENAME: &str = "epa-sample.txt";

pub const EPA_SAMPLE_TEXT: &str = "\
ENVIRONMENTAL PROTECTION AGENCY
40 CFR Part 261
[EPA-HQ-RCRA-2023-0123; FRL-10234-01]
RIN 2050-AH45

Hazardous Waste Management System: Definition of Solid Waste

AGENCY: Environmental Protection Agency (EPA).
ACTION: Final rule.

SUMMARY: The Environmental Protection Agency (EPA) is finalizing amendments to the definition of solid waste under the Resource Conservation and Recovery Act (RCRA). This rule addresses how certain recycled materials are regulated under RCRA's hazardous waste regulations. The final rule will reduce regulatory burden on legitimate recycling while maintaining environmental protection.

DATES: This rule is effective January 1, 2024.

SUPPLEMENTARY INFORMATION:
I. Background
The current regulations create uncertainty for recyclers and manufacturers about when recycled materials are subject to hazardous waste regulations. This final rule provides clarity by establishing clear criteria for determining when recycled materials are solid wastes subject to RCRA Subtitle C regulations.

II. Final Rule
Under this final rule, recycled materials will be considered solid waste unless they meet specific exclusion criteria. The rule establishes a framework for legitimate recycling that considers factors such as:
- Whether the recycling process is legitimate
- Whether hazardous secondary materials are managed as valuable commodities
- Whether the recycling process results in a valuable product

III. Economic Impact
EPA estimates this rule will result in cost savings of $54 million annually for the recycling industry while maintaining equivalent environmental protection. Small businesses will particularly benefit from reduced compliance costs.
";

/// The EPA solid-waste final rule sample as a [`Document`].
pub fn epa_sample() -> Document {
    Document::from_text(EPA_SAMPLE_TEXT, EPA_SAMPLE_FILENAME)
}
