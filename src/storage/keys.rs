//! 오브젝트 키 규칙
//!
//! - 프로필 사진: `{userId}-profile` (사용자당 하나, 덮어쓰기)
//! - 게시글 미디어: `{uuid}-{정리된 원본 파일명}`

use uuid::Uuid;

const MAX_FILE_NAME_LEN: usize = 100;

pub fn profile_photo_key(user_id: &str) -> String {
    format!("{}-profile", user_id)
}

pub fn post_media_key(original_file_name: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_file_name))
}

/// 경로 구분자를 떼어내고 키에 쓰기 애매한 문자는 `_`로 바꾼다
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return "file".to_string();
    }

    // 확장자가 잘리지 않도록 뒤쪽을 남긴다
    let char_count = cleaned.chars().count();
    if char_count > MAX_FILE_NAME_LEN {
        cleaned.chars().skip(char_count - MAX_FILE_NAME_LEN).collect()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_photo_key() {
        assert_eq!(
            profile_photo_key("0b5e6c1e-7a43-4a8e-bb4f-0d9b0f3f2d11"),
            "0b5e6c1e-7a43-4a8e-bb4f-0d9b0f3f2d11-profile"
        );
    }

    #[test]
    fn test_post_media_key_is_unique_and_keeps_name() {
        let a = post_media_key("holiday.jpg");
        let b = post_media_key("holiday.jpg");

        assert_ne!(a, b);
        assert!(a.ends_with("-holiday.jpg"));
        // uuid(36) + '-' + 파일명
        assert_eq!(a.len(), 36 + 1 + "holiday.jpg".len());
    }

    #[test]
    fn test_sanitize_strips_paths_and_spaces() {
        assert_eq!(sanitize_file_name("C:\\Users\\me\\My Photo.png"), "My_Photo.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("사진.jpg"), "__.jpg");
    }

    #[test]
    fn test_sanitize_empty_and_hidden() {
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name("dir/"), "file");
        assert_eq!(sanitize_file_name(".env"), "env");
    }

    #[test]
    fn test_sanitize_keeps_extension_when_truncating() {
        let long = format!("{}.mp4", "a".repeat(300));
        let cleaned = sanitize_file_name(&long);

        assert_eq!(cleaned.len(), MAX_FILE_NAME_LEN);
        assert!(cleaned.ends_with(".mp4"));
    }
}
