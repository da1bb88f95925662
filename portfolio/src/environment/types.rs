use portfolio_core_contact_impl::ContactFeatureServiceImpl;
use portfolio_email_impl::EmailServiceImpl;
use portfolio_extern_impl::contact::ContactApiServiceImpl;
use portfolio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = portfolio_api_rest::RestServer<ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Extern
pub type ContactApi = ContactApiServiceImpl;

// Template
pub type Template = TemplateServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Email, Template>;
