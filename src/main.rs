#[macro_use]
extern crate tracing;

use std::process::exit;

use futures_util::stream::FuturesUnordered;
use futures_util::{StreamExt, TryFutureExt};
use udprelay::{relay, Config};

fn main() {
    let conf = match Config::load() {
        Ok(conf) => conf,
        Err(err) => {
            eprintln!("load config failed, {:?}", err);

            exit(1);
        }
    };

    udprelay::trace_init(conf.log.level, conf.log.timestamp);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(conf.worker())
        .thread_name("udprelay-worker")
        .thread_stack_size(512 * 1024)
        .enable_io()
        .enable_time()
        .build()
        .expect("build tokio runtime failed");

    runtime.block_on(async move {
        info!(message = "starting udp relay", worker = conf.worker());

        let mut tasks = FuturesUnordered::new();

        // Resolve the target and bind nothing yet, a bad address must fail
        // before the loop starts.
        let server = match relay::Server::new(conf.relay).await {
            Ok(server) => server,
            Err(err) => {
                error!(message = "build relay server failed", ?err);

                exit(1);
            }
        };

        tasks.push(tokio::spawn(server.serve().inspect_err(|err| {
            error!(message = "relay serve failed", ?err);
        })));

        // Mimic Golang's errgroup
        let tasks = async move {
            while let Some(result) = tasks.next().await {
                match result {
                    Ok(Ok(())) => continue,
                    Ok(Err(_err)) => {
                        // The relay loop died, e.g. the listening socket
                        // became unusable. Nothing left to serve.
                        exit(1);
                    }
                    Err(err) => {
                        // This should never happened
                        panic!("async task join failed, {}", err);
                    }
                }
            }
        };

        tokio::select! {
            _ = udprelay::shutdown() => {
                // shutdown signal received
            },
            _ = tasks => {}
        }
    });

    runtime.shutdown_timeout(std::time::Duration::from_secs(5));
}
