use clap::Args;
use intervals_core::timer::{run_session, RunOutcome, RunReport, TimerView};
use intervals_core::{AudioHandle, AudioSlot, Config, IntervalSettings, NullSink, Session};

use super::IntervalArgs;
use crate::prompt::{cancel_signal, Prompt};
use crate::view::{JsonView, LineView};

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub interval: IntervalArgs,
    /// Do not sound cues
    #[arg(long)]
    pub mute: bool,
    /// Print events as JSON lines instead of the live display
    #[arg(long)]
    pub json: bool,
}

/// Build the audio handle the first time a run starts.
pub fn audio_for<'a>(slot: &'a mut AudioSlot, config: &Config, mute: bool) -> &'a mut AudioHandle {
    slot.get_or_start(|| {
        if mute {
            AudioHandle::new(&config.sound, Box::new(NullSink))
        } else {
            AudioHandle::from_config(&config.sound)
        }
    })
}

/// Run one session on the current runtime, cancelled by Ctrl-C or `q`.
pub async fn run_timer(
    settings: IntervalSettings,
    audio: &mut AudioHandle,
    prompt: &mut Prompt,
    json: bool,
) -> RunReport {
    let mut session = Session::new(settings);
    let mut line_view;
    let mut json_view;
    let view: &mut dyn TimerView = if json {
        json_view = JsonView::stdout();
        &mut json_view
    } else {
        line_view = LineView::stdout();
        &mut line_view
    };
    run_session(&mut session, audio, view, cancel_signal(prompt)).await
}

pub fn summary(settings: &IntervalSettings, report: &RunReport) -> String {
    match report.outcome {
        RunOutcome::Completed => format!(
            "Done: {} work/rest pair(s) of {}s/{}s in {} tick(s)",
            settings.repeat + 1,
            settings.work,
            settings.rest,
            report.ticks
        ),
        RunOutcome::Cancelled => format!("Cancelled after {} tick(s)", report.ticks),
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let settings = args.interval.resolve(&config);

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(async {
        let mut slot = AudioSlot::new();
        let audio = audio_for(&mut slot, &config, args.mute);
        let mut prompt = Prompt::stdin();
        run_timer(settings, audio, &mut prompt, args.json).await
    });

    if !args.json {
        println!("{}", summary(&settings, &report));
    }
    // Stdin may still be blocked in a read; do not wait for it.
    runtime.shutdown_background();
    Ok(())
}
