use clap::Args;
use intervals_core::{App, AudioSlot, Config, Plan, Screen, SettingsField, SettingsForm};

use super::run::{audio_for, run_timer, summary};
use crate::prompt::{is_quit, Prompt};

#[derive(Args, Debug)]
pub struct FormArgs {
    /// Do not sound cues
    #[arg(long)]
    pub mute: bool,
}

fn bounds_hint(field: SettingsField) -> String {
    let bounds = field.bounds();
    format!("[{}-{}]", bounds.start(), bounds.end())
}

/// Fill the form from the prompt. `None` when the user quits.
async fn fill_form(
    form: &mut SettingsForm,
    prompt: &mut Prompt,
) -> std::io::Result<Option<()>> {
    println!();
    for line in form.labels() {
        println!("  {line}");
    }
    for field in SettingsField::ALL {
        loop {
            let question = format!("{} {}: ", field.label(form.value(field)), bounds_hint(field));
            let Some(answer) = prompt.ask(&question).await? else {
                return Ok(None);
            };
            if is_quit(&answer) {
                return Ok(None);
            }
            match form.input(field, &answer) {
                Ok(_) => break,
                Err(e) => println!("  {e}"),
            }
        }
    }

    let plan = Plan::from_settings(&form.confirm());
    let question = format!(
        "{} steps, {}s total. Go! [enter, q to quit]: ",
        plan.len(),
        plan.total_seconds()
    );
    match prompt.ask(&question).await? {
        Some(answer) if !is_quit(&answer) => Ok(Some(())),
        _ => Ok(None),
    }
}

async fn form_loop(config: &Config, mute: bool) -> std::io::Result<()> {
    let mut app = App::new(config.interval_settings());
    let mut slot = AudioSlot::new();
    let mut prompt = Prompt::stdin();

    loop {
        if app.take_redraw() {
            tracing::debug!(screen = ?app.screen(), "redraw");
        }
        match app.screen() {
            Screen::Settings { settings } => {
                let mut form = SettingsForm::new(settings);
                match fill_form(&mut form, &mut prompt).await? {
                    Some(()) => app.save(form.confirm()),
                    None => return Ok(()),
                }
            }
            Screen::Running { settings } => {
                println!("Running. q + enter or Ctrl-C to cancel.");
                let audio = audio_for(&mut slot, config, mute);
                let report = run_timer(settings, audio, &mut prompt, false).await;
                println!("{}", summary(&settings, &report));
                app.cancel();
            }
        }
    }
}

pub fn run(args: FormArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(form_loop(&config, args.mute));
    runtime.shutdown_background();
    result?;
    Ok(())
}
