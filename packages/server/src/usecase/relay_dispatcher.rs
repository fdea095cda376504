//! UseCase: シグナリング中継（接続・切断・メッセージ転送）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayDispatcher::dispatch() による接続ごとの状態遷移（ABSENT / CONNECTED）
//! - 配信対象（ALL / ALL_EXCEPT）の選定と、部分的な配信失敗の扱い
//!
//! ### なぜこのテストが必要か
//! - 送信者に自分のメッセージが返らないことを保証する
//! - user_count が変更後のレジストリサイズを全員に通知することを保証する
//! - 二重切断や重複接続でレジストリが壊れないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続 → メッセージ転送 → 切断の一連のシナリオ
//! - 異常系：一部の接続への配信失敗、重複接続、未接続の送信者
//! - エッジケース：二重切断、既知フィールドを持たないペイロード、同時接続

use std::sync::Arc;

use futures_util::future::join_all;
use tsunagi_shared::time::{Clock, SystemClock};

use crate::domain::{
    Audience, Connection, ConnectionId, ConnectionRegistry, InboundEvent, OutboundChannel,
    OutboundEvent, SignalKind, SignalTransport, SignalingPayload, Timestamp,
};

/// Per-recipient result of one emission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<ConnectionId>,
    pub failed: Vec<ConnectionId>,
}

impl DeliveryReport {
    pub fn audience_size(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}

/// What `dispatch` did with an inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// ABSENT -> CONNECTED; `user_count` was sent to everyone.
    Connected {
        user_count: usize,
        count_update: DeliveryReport,
    },
    /// The id was already live; nothing changed.
    DuplicateIgnored,
    /// The payload was relayed to everyone but the sender.
    Relayed {
        kind: Option<SignalKind>,
        delivery: DeliveryReport,
    },
    /// A message arrived for an id that is not live; nothing was relayed.
    SenderNotConnected,
    /// CONNECTED -> ABSENT; the departure notice and the new count were sent.
    Disconnected {
        user_count: usize,
        notice: DeliveryReport,
        count_update: DeliveryReport,
    },
    /// Disconnect for an id that is not live; nothing changed.
    AlreadyAbsent,
    /// Transport error; logged only.
    TransportErrorLogged,
}

/// Relay dispatcher
///
/// Owns the connection registry. Every inbound transport event goes through
/// [`RelayDispatcher::dispatch`]: the registry is mutated and a membership
/// snapshot taken, then events are emitted to the snapshot with no lock held.
pub struct RelayDispatcher {
    registry: Arc<dyn ConnectionRegistry>,
    transport: Arc<dyn SignalTransport>,
    clock: Arc<dyn Clock>,
}

impl RelayDispatcher {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, transport: Arc<dyn SignalTransport>) -> Self {
        Self::with_clock(registry, transport, Arc::new(SystemClock))
    }

    pub fn with_clock(
        registry: Arc<dyn ConnectionRegistry>,
        transport: Arc<dyn SignalTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            transport,
            clock,
        }
    }

    /// Handle one inbound transport event.
    ///
    /// Never fails: duplicate connects, unknown senders and delivery failures
    /// are logged and reported through the returned outcome.
    pub async fn dispatch(&self, event: InboundEvent) -> DispatchOutcome {
        match event {
            InboundEvent::Connect { id, outbox } => self.on_connect(id, outbox).await,
            InboundEvent::Message { id, payload } => self.on_message(id, payload).await,
            InboundEvent::Disconnect { id } => self.on_disconnect(id).await,
            InboundEvent::TransportError { id, reason } => {
                tracing::warn!(sid = %id, %reason, "Transport error");
                DispatchOutcome::TransportErrorLogged
            }
        }
    }

    /// The outbox is attached before the id becomes a registry member, so any
    /// snapshot that contains the id can already deliver to it.
    async fn on_connect(&self, id: ConnectionId, outbox: OutboundChannel) -> DispatchOutcome {
        if !self.transport.register(id.clone(), outbox).await {
            tracing::warn!(sid = %id, "Ignoring connect: outbox already attached");
            return DispatchOutcome::DuplicateIgnored;
        }

        let connection = Connection::new(id.clone(), Timestamp::new(self.clock.now_millis()));
        if let Err(e) = self.registry.add(connection).await {
            tracing::warn!(sid = %id, "Ignoring connect: {}", e);
            self.transport.unregister(&id).await;
            return DispatchOutcome::DuplicateIgnored;
        }

        let members = self.registry.members().await;
        let user_count = members.len();
        tracing::info!(sid = %id, user_count, "Client connected");

        let count_update = self
            .deliver(
                &Audience::All,
                &members,
                &OutboundEvent::UserCount { count: user_count },
            )
            .await;

        DispatchOutcome::Connected {
            user_count,
            count_update,
        }
    }

    async fn on_message(&self, id: ConnectionId, payload: SignalingPayload) -> DispatchOutcome {
        let members = self.registry.members().await;
        if !members.contains(&id) {
            tracing::warn!(sid = %id, "Dropping message from a connection that is not live");
            return DispatchOutcome::SenderNotConnected;
        }

        let kind = payload.classify();
        match kind {
            Some(kind) => tracing::info!(sid = %id, %kind, "Relaying signaling message"),
            None => tracing::info!(sid = %id, kind = "unclassified", "Relaying signaling message"),
        }

        let delivery = self
            .deliver(
                &Audience::AllExcept(id),
                &members,
                &OutboundEvent::Message(payload),
            )
            .await;

        DispatchOutcome::Relayed { kind, delivery }
    }

    /// Membership ends before the outbox is detached; only snapshots taken
    /// before the removal can still address the departing id.
    async fn on_disconnect(&self, id: ConnectionId) -> DispatchOutcome {
        if !self.registry.remove(&id).await {
            tracing::debug!(sid = %id, "Disconnect for a connection that is already gone");
            return DispatchOutcome::AlreadyAbsent;
        }
        self.transport.unregister(&id).await;

        let members = self.registry.members().await;
        let user_count = members.len();
        tracing::info!(sid = %id, user_count, "Client disconnected");

        let notice = self
            .deliver(
                &Audience::AllExcept(id.clone()),
                &members,
                &OutboundEvent::UserDisconnected { sid: id },
            )
            .await;
        let count_update = self
            .deliver(
                &Audience::All,
                &members,
                &OutboundEvent::UserCount { count: user_count },
            )
            .await;

        DispatchOutcome::Disconnected {
            user_count,
            notice,
            count_update,
        }
    }

    /// Send an event to every live connection except `exclude`.
    pub async fn broadcast_except(
        &self,
        exclude: &ConnectionId,
        event: &OutboundEvent,
    ) -> DeliveryReport {
        let members = self.registry.members().await;
        self.deliver(&Audience::AllExcept(exclude.clone()), &members, event)
            .await
    }

    /// Live connections ordered by connect time.
    pub async fn connections(&self) -> Vec<Connection> {
        self.registry.connections().await
    }

    /// Emit `event` to every audience member independently.
    ///
    /// Sends run concurrently; a failure is logged and recorded, and never
    /// stops delivery to the remaining members or touches the registry.
    async fn deliver(
        &self,
        audience: &Audience,
        members: &[ConnectionId],
        event: &OutboundEvent,
    ) -> DeliveryReport {
        let targets = audience.resolve(members);
        let results = join_all(
            targets
                .iter()
                .map(|target| self.transport.send_to(target, event)),
        )
        .await;

        let mut report = DeliveryReport::default();
        for (target, result) in targets.into_iter().zip(results) {
            match result {
                Ok(()) => {
                    tracing::debug!(sid = %target, event = event.name(), "Delivered");
                    report.delivered.push(target);
                }
                Err(e) => {
                    tracing::warn!(sid = %target, event = event.name(), "Delivery failed: {}", e);
                    report.failed.push(target);
                }
            }
        }
        report
    }
}
