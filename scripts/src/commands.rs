//! The deploy-and-report procedure

use std::{future::Future, io::Write, process::ExitCode};

use tracing::info;

use crate::{
    artifacts::{BlueprintSource, HardhatArtifacts},
    cli::Cli,
    client::{setup_client, DeploymentClient, PendingDeployment},
    errors::ScriptError,
    types::Deployment,
};

/// Resolve the named blueprint, connect to the network, deploy the
/// blueprint with no constructor arguments and wait for the deployment to be
/// confirmed.
///
/// `connect` is only invoked once the blueprint has been resolved, so a bad
/// artifact never results in network traffic.
pub async fn deploy_contract<C, F, Fut>(
    name: &str,
    source: &impl BlueprintSource,
    connect: F,
) -> Result<Deployment, ScriptError>
where
    C: DeploymentClient,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<C, ScriptError>>,
{
    let blueprint = source.resolve(name)?;
    let client = connect().await?;

    let pending = client.submit(&blueprint).await?;
    let tx_hash = pending.tx_hash();

    let address = pending.confirm().await?;
    info!("Deployment tx {:#x} confirmed", tx_hash);

    Ok(Deployment {
        contract_name: blueprint.contract_name,
        tx_hash,
        address,
    })
}

/// Translate the outcome of a deployment into output and an exit code.
///
/// On success exactly one line is written to `out`; on failure the error is
/// written to `err` and nothing to `out`.
pub fn report(
    outcome: Result<Deployment, ScriptError>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> ExitCode {
    match outcome {
        Ok(deployment) => match writeln!(out, "{}", deployment).and_then(|_| out.flush()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                let _ = writeln!(err, "Error: failed to write deployment: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the deploy script as configured on the command line, writing the
/// deployed address to `out` or the error to `err`
pub async fn run(cli: Cli, out: &mut impl Write, err: &mut impl Write) -> ExitCode {
    let store = HardhatArtifacts::new(&cli.artifacts);
    let outcome = deploy_contract(&cli.contract, &store, || {
        setup_client(&cli.priv_key, &cli.rpc_url)
    })
    .await;

    report(outcome, out, err)
}
