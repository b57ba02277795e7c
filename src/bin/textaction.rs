//! Run a single text action from the command line.
//!
//! Usage:
//!   textaction <settings.json> <action-id> <text> [input-lang] [output-lang]
//!   textaction <settings.json> --list
//!
//! Set RUST_LOG=debug to follow the pipeline steps.

use std::sync::Arc;
use log::{debug, error};

use textaction::config::TransportConfig;
use textaction::{
  ActionBackend, ActionPipeline, ActionRequest, FileSettingsStore,
  HttpTransport, StaticPromptCatalog
};

const USAGE: &str = "usage: textaction <settings.json> \
  (<action-id> <text> [input-lang] [output-lang] | --list)";

#[tokio::main]
async fn main()
{   env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2
    {   eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    let transport = match HttpTransport::new(&TransportConfig::default())
    {   Ok(t) => t
      , Err(e) => {
          error!("Failed to create transport: {}", e);
          std::process::exit(1);
        }
    };

    let pipeline = Arc::new(ActionPipeline::new(
      Arc::new(StaticPromptCatalog::builtin()),
      Arc::new(FileSettingsStore::new(&args[0])),
      Arc::new(transport)
    ));
    let backend = ActionBackend::new(pipeline);

    let code = if args[1] == "--list"
    {   list_actions(&backend).await
    } else if args.len() < 3
    {   eprintln!("{}", USAGE);
        2
    } else
    {   let mut request = ActionRequest::new(&args[1], &args[2]);
        if let (Some(input), Some(output)) = (args.get(3), args.get(4))
        {   request = request.with_languages(input, output);
        }
        run_action(&backend, request).await
    };

    if let Err(e) = backend.shutdown().await
    {   error!("Backend shutdown failed: {}", e);
    }
    std::process::exit(code);
}

async fn list_actions(backend: &ActionBackend) -> i32
{   let mut rx = match backend.get_action_groups().await
    {   Ok(rx) => rx
      , Err(e) => {
          error!("{}", e);
          return 1;
        }
    };

    match rx.recv().await
    {   Some(Ok(groups)) => {
          for group in groups
          {   println!("{}", group.category);
              for action in group.actions
              {   println!("  {:<16} {}", action.id, action.name);
              }
          }
          0
        }
      , Some(Err(e)) => {
          eprintln!("{}", e);
          1
        }
      , None => {
          error!("Backend closed before replying");
          1
        }
    }
}

async fn run_action(backend: &ActionBackend, request: ActionRequest)
  -> i32
{   debug!("Running action {}", request.id);
    let mut rx = match backend.process_action(request).await
    {   Ok(rx) => rx
      , Err(e) => {
          error!("{}", e);
          return 1;
        }
    };

    let reply = match rx.recv().await
    {   Some(reply) => reply
      , None => {
          error!("Backend closed before replying");
          return 1;
        }
    };

    match textaction::into_ui_reply(reply)
    {   (text, None) => {
          println!("{}", text);
          0
        }
      , (_, Some(message)) => {
          eprintln!("{}", message);
          1
        }
    }
}
