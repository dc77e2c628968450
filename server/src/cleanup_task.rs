use std::time::Duration;

use common::log;

use crate::room_manager::RoomManager;

pub struct CleanupTask {
    room_manager: RoomManager,
    check_interval: Duration,
    inactivity_timeout: Duration,
}

impl CleanupTask {
    pub fn new(
        room_manager: RoomManager,
        check_interval: Duration,
        inactivity_timeout: Duration,
    ) -> Self {
        Self {
            room_manager,
            check_interval,
            inactivity_timeout,
        }
    }

    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.check_interval);

        loop {
            interval.tick().await;
            self.cleanup_inactive_rooms().await;
        }
    }

    pub async fn cleanup_inactive_rooms(&self) -> usize {
        let inactive_rooms = self
            .room_manager
            .inactive_rooms(self.inactivity_timeout)
            .await;

        let mut removed = 0;
        for session_id in inactive_rooms {
            log!("Cleaning up inactive room: {}", session_id);
            if self.room_manager.remove_room(&session_id).await {
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::gomoku::GomokuSettings;
    use crate::win_broadcaster::WinBroadcaster;

    #[tokio::test]
    async fn test_cleanup_removes_only_idle_rooms() {
        let manager = RoomManager::new(WinBroadcaster::new());
        manager.create_room(GomokuSettings::default()).await;

        let patient = CleanupTask::new(
            manager.clone(),
            Duration::from_secs(1),
            Duration::from_secs(3600),
        );
        assert_eq!(patient.cleanup_inactive_rooms().await, 0);
        assert_eq!(manager.room_count().await, 1);

        let eager = CleanupTask::new(manager.clone(), Duration::from_secs(1), Duration::ZERO);
        assert_eq!(eager.cleanup_inactive_rooms().await, 1);
        assert_eq!(manager.room_count().await, 0);
    }
}
