use anyhow::{Context, Result};

use crate::companies::Company;
use crate::enrichment::normalize_website_url;

/// Open a URL in the user's default browser
///
/// # Errors
/// Returns error if browser cannot be opened (e.g., no browser available)
pub fn open_url(url: &str) -> Result<()> {
    webbrowser::open(url).with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}

/// The URL `open` visits for a company: its website, with `https://` added
/// to bare domains.
pub fn company_url(company: &Company) -> String {
    normalize_website_url(&company.website)
}

/// Open a company's website, returning the URL that was opened.
pub fn open_company(company: &Company) -> Result<String> {
    let url = company_url(company);
    open_url(&url)?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::sample_companies;

    #[test]
    fn test_company_url_adds_scheme() {
        let companies = sample_companies();
        assert_eq!(company_url(&companies[0]), "https://ledgerloop.io");

        let mut company = companies[0].clone();
        company.website = "http://legacy.example".to_string();
        assert_eq!(company_url(&company), "http://legacy.example");
    }
}
