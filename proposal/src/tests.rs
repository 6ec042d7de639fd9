use super::*;
use consensus_types::{
    beacon::{version, BeaconBlockHeader},
    chain_spec::ChainSpec,
    H256,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

#[derive(Clone)]
struct MockSync(Rc<Cell<SyncStatus>>);

impl SyncStatusSource for MockSync {
    fn sync_status(&self) -> SyncStatus {
        self.0.get()
    }
}

#[derive(Clone, Default)]
struct MockBuilder {
    calls: Rc<Cell<usize>>,
    fail: bool,
    nil: bool,
}

impl BeaconBlockBuilder for MockBuilder {
    fn request_best_block(&self, slot: Slot) -> anyhow::Result<Option<BeaconBlock>> {
        self.calls.set(self.calls.get() + 1);

        if self.fail {
            anyhow::bail!("payload is not ready");
        }
        if self.nil {
            return Ok(None);
        }

        let mut block =
            BeaconBlock::new_with_version(slot, 11, H256::repeat_byte(0xaa), version::DENEB)?;
        block.set_state_root(H256::repeat_byte(0xbb));

        Ok(Some(block))
    }
}

#[derive(Clone, Default)]
struct MockReceiver {
    received: Rc<RefCell<Vec<BeaconBlockHeader>>>,
    fail: bool,
}

impl BlockReceiver for MockReceiver {
    fn receive_beacon_block(&self, block: &BeaconBlock) -> anyhow::Result<()> {
        self.received.borrow_mut().push(block.header());

        if self.fail {
            anyhow::bail!("state transition failed");
        }

        Ok(())
    }
}

struct Fixture {
    status: Rc<Cell<SyncStatus>>,
    builder: MockBuilder,
    receiver: MockReceiver,
    handler: Handler<MockSync, MockBuilder, MockReceiver>,
}

fn fixture_with(config: Config, builder: MockBuilder, receiver: MockReceiver) -> Fixture {
    let status = Rc::new(Cell::new(SyncStatus::Synced));
    let handler = Handler::new(
        config,
        ChainSpec::default(),
        MockSync(status.clone()),
        builder.clone(),
        receiver.clone(),
    )
    .unwrap();

    Fixture {
        status,
        builder,
        receiver,
        handler,
    }
}

fn fixture() -> Fixture {
    fixture_with(Config::default(), MockBuilder::default(), MockReceiver::default())
}

fn app_txs(len: usize) -> Vec<Vec<u8>> {
    (0..len).map(|i| vec![0x10 + i as u8; 3]).collect()
}

fn passthrough(request: PrepareProposalRequest) -> anyhow::Result<PrepareProposalResponse> {
    Ok(PrepareProposalResponse { txs: request.txs })
}

fn prepare(fixture: &Fixture, height: Slot, txs: Vec<Vec<u8>>) -> PrepareProposalResponse {
    fixture
        .handler
        .prepare_proposal(PrepareProposalRequest { height, txs }, passthrough)
        .unwrap()
}

#[test]
fn prepare_then_process_roundtrip() {
    for len in [0, 1, 5] {
        for position in [0, len] {
            let config = Config {
                beacon_block_position: position,
                blob_sidecars_position: position + 1,
            };
            let fixture = fixture_with(config, MockBuilder::default(), MockReceiver::default());
            assert_eq!(fixture.handler.config().beacon_block_position, position);
            let original = app_txs(len);

            let response = prepare(&fixture, 64, original.clone());
            assert_eq!(response.txs.len(), len + 1);
            assert_eq!(fixture.builder.calls.get(), 1);

            let forwarded = RefCell::new(None);
            let result = fixture.handler.process_proposal(
                ProcessProposalRequest {
                    height: 64,
                    txs: response.txs,
                },
                |request| {
                    *forwarded.borrow_mut() = Some(request.txs);
                    Ok(ProcessProposalResponse::Accept)
                },
            );

            assert!(result.is_accepted(), "{:?}", result.error());
            assert_eq!(result.status(), ProposalStatus::Accept);
            assert_eq!(forwarded.into_inner(), Some(original));

            let received = fixture.receiver.received.borrow();
            assert_eq!(received.len(), 1);
            assert_eq!(received[0].slot, 64);
            assert_eq!(received[0].proposer_index, 11);
            assert_eq!(received[0].state_root, H256::repeat_byte(0xbb));
        }
    }
}

#[test]
fn prepare_inserts_encoded_block() {
    let fixture = fixture();
    let response = prepare(&fixture, 7, app_txs(2));

    let expected = BeaconBlock::new_with_version(7, 11, H256::repeat_byte(0xaa), version::DENEB)
        .map(|mut block| {
            block.set_state_root(H256::repeat_byte(0xbb));
            block.marshal_ssz()
        })
        .unwrap();

    assert_eq!(response.txs[0], expected);
    assert_eq!(&response.txs[1..], &app_txs(2)[..]);
}

#[test]
fn prepare_fails_when_execution_ahead() {
    let fixture = fixture();
    fixture.status.set(SyncStatus::ExecutionAhead);

    let next_called = Cell::new(false);
    let result = fixture.handler.prepare_proposal(
        PrepareProposalRequest {
            height: 1,
            txs: app_txs(3),
        },
        |request| {
            next_called.set(true);
            passthrough(request)
        },
    );

    assert!(matches!(
        result,
        Err(Error::ValidatorClientNotSynced(SyncStatus::ExecutionAhead))
    ));
    assert_eq!(fixture.builder.calls.get(), 0);
    assert!(!next_called.get());
}

#[test]
fn prepare_tolerates_lagging_execution() {
    let fixture = fixture();
    fixture.status.set(SyncStatus::NotSynced);

    assert_eq!(prepare(&fixture, 1, vec![]).txs.len(), 1);
}

#[test]
fn prepare_propagates_builder_failures() {
    let builder = MockBuilder {
        fail: true,
        ..Default::default()
    };
    let fixture = fixture_with(Config::default(), builder, MockReceiver::default());
    assert!(matches!(
        fixture
            .handler
            .prepare_proposal(PrepareProposalRequest::default(), passthrough),
        Err(Error::BuildBlock(_))
    ));

    let builder = MockBuilder {
        nil: true,
        ..Default::default()
    };
    let fixture = fixture_with(Config::default(), builder, MockReceiver::default());
    assert!(matches!(
        fixture.handler.prepare_proposal(
            PrepareProposalRequest {
                height: 5,
                txs: vec![]
            },
            passthrough
        ),
        Err(Error::NilBlock(5))
    ));
}

#[test]
fn prepare_position_past_end() {
    let config = Config {
        beacon_block_position: 3,
        blob_sidecars_position: 4,
    };
    let fixture = fixture_with(config, MockBuilder::default(), MockReceiver::default());

    assert!(matches!(
        fixture.handler.prepare_proposal(
            PrepareProposalRequest {
                height: 1,
                txs: app_txs(2)
            },
            passthrough
        ),
        Err(Error::PositionOutOfRange {
            position: 3,
            len: 2
        })
    ));
}

#[test]
fn process_rejects_unless_synced() {
    let fixture = fixture();
    let txs = prepare(&fixture, 3, app_txs(1)).txs;

    for status in [SyncStatus::ExecutionAhead, SyncStatus::NotSynced] {
        fixture.status.set(status);

        let response = fixture.handler.process_proposal(
            ProcessProposalRequest {
                height: 3,
                txs: txs.clone(),
            },
            |_| Ok(ProcessProposalResponse::Accept),
        );

        assert_eq!(response.status(), ProposalStatus::Reject);
        assert!(matches!(response.error(), Some(Error::ClientNotSynced(s)) if *s == status));
    }

    assert!(fixture.receiver.received.borrow().is_empty());
}

#[test]
fn process_rejects_undecodable_block() {
    let fixture = fixture();
    let mut txs = prepare(&fixture, 3, app_txs(1)).txs;
    txs[0].truncate(10);

    let response = fixture.handler.process_proposal(
        ProcessProposalRequest { height: 3, txs },
        |_| Ok(ProcessProposalResponse::Accept),
    );

    assert!(matches!(response, ProcessProposalResponse::Reject(Error::Block(_))));
    assert!(fixture.receiver.received.borrow().is_empty());
}

#[test]
fn process_rejects_unsupported_fork() {
    let status = Rc::new(Cell::new(SyncStatus::Synced));
    let receiver = MockReceiver::default();
    let handler = Handler::new(
        Config::default(),
        ChainSpec {
            slots_per_epoch: 32,
            deneb_fork_epoch: 1,
        },
        MockSync(status),
        MockBuilder::default(),
        receiver.clone(),
    )
    .unwrap();

    let txs = handler
        .prepare_proposal(
            PrepareProposalRequest {
                height: 31,
                txs: vec![],
            },
            passthrough,
        )
        .unwrap()
        .txs;
    let response = handler.process_proposal(ProcessProposalRequest { height: 31, txs }, |_| {
        Ok(ProcessProposalResponse::Accept)
    });

    assert!(matches!(
        response.error(),
        Some(Error::Block(consensus_types::beacon::Error::ForkVersionNotSupported(
            version::CAPELLA
        )))
    ));
    assert!(receiver.received.borrow().is_empty());
}

#[test]
fn process_rejects_missing_block() {
    let fixture = fixture();

    let response = fixture.handler.process_proposal(
        ProcessProposalRequest {
            height: 3,
            txs: vec![],
        },
        |_| Ok(ProcessProposalResponse::Accept),
    );

    assert!(matches!(
        response.error(),
        Some(Error::PositionOutOfRange {
            position: 0,
            len: 0
        })
    ));
}

#[test]
fn process_rejects_when_receiver_fails() {
    let receiver = MockReceiver {
        fail: true,
        ..Default::default()
    };
    let fixture = fixture_with(Config::default(), MockBuilder::default(), receiver);
    let txs = prepare(&fixture, 9, app_txs(2)).txs;

    let next_called = Cell::new(false);
    let response = fixture.handler.process_proposal(
        ProcessProposalRequest { height: 9, txs },
        |_| {
            next_called.set(true);
            Ok(ProcessProposalResponse::Accept)
        },
    );

    assert!(matches!(response.error(), Some(Error::ReceiveBlock(_))));
    assert_eq!(fixture.receiver.received.borrow().len(), 1);
    assert!(!next_called.get());
}

#[test]
fn invalid_config_is_rejected() {
    let config = Config {
        beacon_block_position: 1,
        blob_sidecars_position: 1,
    };
    let result = Handler::new(
        config,
        ChainSpec::default(),
        MockSync(Rc::new(Cell::new(SyncStatus::Synced))),
        MockBuilder::default(),
        MockReceiver::default(),
    );

    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}
