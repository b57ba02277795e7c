use std::sync::Arc;
use tokio::sync::mpsc;
use log::{debug, error, info};
use crate::ActionFoot;

/// Public API for the action backend - owns the task
pub struct ActionBackend
{   hand: crate::ActionHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl ActionBackend
{   /// Create and spawn a new action backend
    /// Returns immediately - spawns background task
    pub fn new(
      pipeline: Arc<crate::pipeline::ActionPipeline>
    ) -> Self
    {   debug!("Creating ActionBackend with task ownership");

        let (process_action_tx, process_action_rx)
          = mpsc::unbounded_channel();
        let (get_action_groups_tx, get_action_groups_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::ActionHand
        {   process_action_tx
          , get_action_groups_tx
          , kill_process_tx
        };

        let foot = crate::ActionFoot
        {   process_action_rx
          , get_action_groups_rx
          , kill_process_rx
        };

        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, pipeline).await
        });

        ActionBackend
        {   hand
          , _task_handle
        }
    }

    /// Queue an action - returns almost immediately
    pub async fn process_action(
      &self
    , request: crate::request::ActionRequest
    ) -> Result<
        mpsc::UnboundedReceiver<crate::ProcessActionReply>,
        crate::error::Error
      >
    {   debug!("process_action queuing action: {}", request.id);
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::ProcessActionArgs
        {   request
          , reply: reply_tx
        };

        self.hand.process_action_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel closed");
            crate::error::Error::Other(
              "Backend disconnected".to_string()
            )
          })?;

        Ok(reply_rx)
    }

    /// Get action groups - returns almost immediately
    pub async fn get_action_groups(
      &self
    ) -> Result<
        mpsc::UnboundedReceiver<crate::GetActionGroupsReply>,
        crate::error::Error
      >
    {   debug!("get_action_groups queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::GetActionGroupsArgs
        {   reply: reply_tx
        };

        self.hand.get_action_groups_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel closed");
            crate::error::Error::Other(
              "Backend disconnected".to_string()
            )
          })?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down ActionBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::Other(
              "Backend already shutdown".to_string()
            )
          })?;

        // Wait for shutdown confirmation
        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend shutdown timeout");
            Err(crate::error::Error::Timeout)
        }
    }
}

/// Main backend event loop
///
/// tokio::select! only routes commands. Each action runs in its
/// own task so a slow completion never holds up the next request.
async fn run_backend_loop(
  foot: crate::ActionFoot
, pipeline: Arc<crate::pipeline::ActionPipeline>
)
{   debug!("Starting ActionBackend event loop");
    let ActionFoot
    {   mut process_action_rx
      , mut get_action_groups_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = process_action_rx.recv() => {
          debug!("Received ProcessAction: {}", cmd.request.id);
          let pipeline = Arc::clone(&pipeline);
          tokio::spawn(async move {
            let result = pipeline
              .process_action(&cmd.request)
              .await;
            let _ = cmd.reply.send(result);
          });
        }
      , Some(cmd) = get_action_groups_rx.recv() => {
          debug!("Received GetActionGroups");
          let groups = pipeline.prompts().action_groups().await;
          let _ = cmd.reply.send(Ok(groups));
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("ActionBackend shutting down");
          break;
        }
      , else => {
          debug!("All command channels closed");
          break;
        }
      }
    }
}
