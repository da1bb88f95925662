use std::sync::Arc;

use portfolio_di::Build;
use portfolio_templates_contracts::{
    RenderedTemplate, Template, TemplateService, BASE_TEMPLATE, TEMPLATES,
};
use tera::Tera;

#[derive(Debug, Clone, Default, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        let templates = [("base.html".to_owned(), BASE_TEMPLATE)]
            .into_iter()
            .chain(TEMPLATES.iter().flat_map(|&(name, text, html)| {
                [(text_name(name), text), (html_name(name), html)]
            }));

        tera.add_raw_templates(templates).unwrap();

        Self(tera.into())
    }
}

fn text_name(name: &str) -> String {
    format!("{name}.txt")
}

fn html_name(name: &str) -> String {
    format!("{name}.html")
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<RenderedTemplate> {
        let context = tera::Context::from_serialize(template)?;
        let render = |name: String| {
            self.state.0.render(&name, &context).inspect_err(|err| {
                tracing::error!(template = %name, "failed to render template: {err}")
            })
        };

        Ok(RenderedTemplate {
            text: render(text_name(T::NAME))?,
            html: render(html_name(T::NAME))?,
        })
    }
}
