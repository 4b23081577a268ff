pub mod kakao;
