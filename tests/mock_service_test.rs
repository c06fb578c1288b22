#[cfg(feature = "mock")]
mod mock_tests {
    use mockall::predicate::*;
    use playlist_backup::{
        BackupConfig, BackupService, MockRemoteStore, MockStreamingService, Page, Playlist,
        PlaylistSelector, RetryConfig, Track,
    };
    use chrono::{TimeZone, Utc};

    fn sample_playlist() -> Playlist {
        Playlist {
            id: "p1".to_string(),
            name: "Focus".to_string(),
            description: String::new(),
            owner: "owner".to_string(),
            snapshot_id: "snap".to_string(),
            total_tracks: 1,
            tracks: Vec::new(),
        }
    }

    fn sample_track() -> Track {
        Track {
            id: "t1".to_string(),
            name: "Song".to_string(),
            artists: vec!["Artist".to_string()],
            album_name: "Album".to_string(),
            album_release_date: "2024-01-01".to_string(),
            added_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            added_by: "user-1".to_string(),
            duration_ms: 1000,
            is_local: false,
        }
    }

    fn config() -> BackupConfig {
        BackupConfig {
            backup_folder: "/backups".to_string(),
            dry_run: false,
            retry: RetryConfig {
                max_transient_retries: 0,
                base_delay: 0,
                max_delay: 0,
                rate_limit_delay: 0,
            },
        }
    }

    #[tokio::test]
    async fn test_mock_backup_flow() {
        let mut streaming = MockStreamingService::new();
        streaming
            .expect_playlists_page()
            .with(eq(None::<String>))
            .times(1)
            .returning(|_| Ok(Page::last(vec![sample_playlist()])));
        streaming
            .expect_playlist_tracks_page()
            .with(eq("p1"), eq(None::<String>))
            .times(1)
            .returning(|_, _| Ok(Page::last(vec![sample_track()])));

        let mut store = MockRemoteStore::new();
        store
            .expect_ensure_folder()
            .with(eq("/backups"))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_put()
            .withf(|path, content| {
                path == "/backups/Focus-p1.csv" && content.starts_with('\u{feff}')
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BackupService::new(Box::new(streaming), Box::new(store), config());
        let report = service
            .backup_all_playlists(&PlaylistSelector::All)
            .await
            .unwrap();

        assert_eq!(report.successful, 1);
        assert_eq!(report.failed, 0);
    }
}
