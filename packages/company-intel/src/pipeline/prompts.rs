//! System-prompt construction for the chat assistant.

use crate::types::company::CompanyRecord;

/// Render the facts known about a company as briefing text.
pub fn company_briefing(company: &CompanyRecord) -> String {
    format!(
        "Company Name: {}\n\
         Address: {} {}\n\
         Country: {}\n\
         Phone: {}\n\
         Website: {}\n\
         \n\
         Company Description:\n\
         {}",
        company.name,
        company.street_address.as_deref().unwrap_or(""),
        company.postal_code.as_deref().unwrap_or(""),
        company.country.as_deref().unwrap_or("N/A"),
        company.phone.as_deref().unwrap_or("N/A"),
        company.website.as_deref().unwrap_or("N/A"),
        company
            .description
            .as_deref()
            .unwrap_or("No description available"),
    )
}

/// The system instruction for a conversation about one company.
pub fn analyst_prompt(company: &CompanyRecord) -> String {
    format!(
        "You are a helpful business analyst assistant. Use the following information about the company to answer questions:\n\
         \n\
         {}\n\
         \n\
         When answering questions, only use information from this content. If the information is not in the content, say so clearly.\n\
         Be concise and professional in your answers.",
        company_briefing(company)
    )
}
