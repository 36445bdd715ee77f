use crate::cli::{LangAction, ThemeAction};
use crate::context::CliContext;
use crate::output;

pub fn handle_theme(ctx: &mut CliContext, action: ThemeAction) -> anyhow::Result<()> {
    let theme = match action {
        ThemeAction::Get => {
            output::output_success(serde_json::json!({ "theme": ctx.preferences.theme().as_str() }));
            return Ok(());
        }
        ThemeAction::Set { theme } => theme,
        ThemeAction::Toggle => ctx.preferences.theme().toggled(),
    };
    ctx.preferences.set_theme(theme)?;
    let toast = ctx.controller.theme_changed(theme);
    output::output_success(serde_json::json!({
        "theme": theme.as_str(),
        "message": toast.message,
    }));
    Ok(())
}

pub fn handle_lang(ctx: &mut CliContext, action: LangAction) -> anyhow::Result<()> {
    match action {
        LangAction::Get => {
            let language = ctx.preferences.language();
            output::output_success(serde_json::json!({
                "language": language.as_str(),
                "name": language.native_name(),
            }));
        }
        LangAction::Set { language } => {
            ctx.preferences.set_language(language)?;
            ctx.scheduler.set_language(language);
            let toast = ctx.controller.set_language(language);
            output::output_success(serde_json::json!({
                "language": language.as_str(),
                "message": toast.message,
            }));
        }
    }
    Ok(())
}
